//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos::task::spawn_local;

use crate::api::HttpApi;
use crate::auth::Authenticator;
use crate::board::ProjectBoard;
use crate::config::PortalConfig;
use crate::error::FlowError;
use crate::models::{ProjectFields, ProjectId};
use crate::session::{gate, Access, BrowserStorage, Session};

pub type Board = ProjectBoard<HttpApi>;

/// App-wide configuration and the factories built from it
#[derive(Clone)]
pub struct PortalContext {
    pub config: PortalConfig,
}

impl PortalContext {
    pub fn new(config: PortalConfig) -> Self {
        Self { config }
    }

    pub fn api(&self) -> HttpApi {
        HttpApi::new(self.config.clone())
    }

    pub fn authenticator(&self) -> Authenticator<HttpApi, BrowserStorage> {
        Authenticator::new(self.api(), BrowserStorage, self.config.clone())
    }

    pub fn access(&self) -> Access {
        gate(&BrowserStorage, &self.config)
    }
}

pub fn use_portal() -> PortalContext {
    use_context::<PortalContext>().expect("PortalContext should be provided")
}

/// Dashboard signals around the project board
#[derive(Clone, Copy)]
pub struct BoardContext {
    board: StoredValue<Rc<Board>, LocalStorage>,
    config: StoredValue<PortalConfig>,
    /// Bumped whenever board state changes - read
    pub revision: ReadSignal<u32>,
    /// Bumped whenever board state changes - write
    set_revision: WriteSignal<u32>,
    /// A remote operation is outstanding
    pending: RwSignal<bool>,
    notice: RwSignal<Option<String>>,
    expired: RwSignal<bool>,
}

impl BoardContext {
    pub fn new(board: Board, config: PortalConfig) -> Self {
        let (revision, set_revision) = signal(0u32);
        Self {
            board: StoredValue::new_local(Rc::new(board)),
            config: StoredValue::new(config),
            revision,
            set_revision,
            pending: RwSignal::new(false),
            notice: RwSignal::new(None),
            expired: RwSignal::new(false),
        }
    }

    /// Re-render everything that reads the board
    pub fn reload(&self) {
        self.set_revision.update(|v| *v += 1);
    }

    /// Reactive read of board state
    pub fn read<T>(&self, f: impl FnOnce(&Board) -> T) -> T {
        let _ = self.revision.get();
        self.board.with_value(|board| f(board))
    }

    /// Run a remote board operation in the background, then surface its
    /// outcome
    pub fn spawn<F, Fut>(&self, op: F)
    where
        F: FnOnce(Rc<Board>) -> Fut + 'static,
        Fut: Future<Output = Result<(), FlowError>> + 'static,
    {
        let board = self.board.get_value();
        let ctx = *self;
        self.pending.set(true);
        self.notice.set(None);
        spawn_local(async move {
            let result = op(board).await;
            ctx.finish(result);
        });
    }

    fn finish(&self, result: Result<(), FlowError>) {
        self.pending.set(false);
        match result {
            Ok(()) => {}
            Err(FlowError::SessionExpired) => {
                self.config.with_value(|config| Session::clear(&BrowserStorage, config));
                self.expired.set(true);
            }
            Err(err) => self.notice.set(Some(err.to_string())),
        }
        self.reload();
    }

    /// Draft edits do not re-render the inputs that produced them
    pub fn edit_draft(&self, edit: impl FnOnce(&mut ProjectFields)) {
        self.board.with_value(|board| board.update_draft(edit));
    }

    /// Local board change followed by a re-render
    pub fn apply(&self, f: impl FnOnce(&Board)) {
        self.board.with_value(|board| f(board));
        self.reload();
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    pub fn notice(&self) -> Option<String> {
        self.notice.get()
    }

    pub fn dismiss_notice(&self) {
        self.notice.set(None);
    }

    pub fn is_expired(&self) -> bool {
        self.expired.get()
    }

    pub fn is_pending_delete(&self, id: ProjectId) -> bool {
        self.read(|board| board.pending_delete() == Some(id))
    }
}

pub fn use_board() -> BoardContext {
    use_context::<BoardContext>().expect("BoardContext should be provided")
}
