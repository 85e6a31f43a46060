//! Project Board
//!
//! List/editor flow behind the dashboard. The server is the only source of
//! truth: every successful mutation is followed by a full refetch, and a
//! failed one leaves local state exactly as it was.
//!
//! State sits in a `RefCell` because the board is shared by UI callbacks on
//! one thread. Borrows are never held across an `.await`.

use std::cell::{Cell, RefCell};

use crate::api::PortalApi;
use crate::busy::BusyFlag;
use crate::editor::{Draft, Submission};
use crate::error::{ApiError, FlowError};
use crate::models::{Project, ProjectFields, ProjectId};
use crate::session::Session;

#[derive(Debug, Default)]
struct BoardState {
    /// Last fetched collection, server order
    projects: Vec<Project>,
    draft: Draft,
    filter: String,
    pending_delete: Option<ProjectId>,
}

pub struct ProjectBoard<A> {
    api: A,
    session: Session,
    state: RefCell<BoardState>,
    busy: BusyFlag,
    /// Number of list requests issued; only the newest may land
    fetches: Cell<u64>,
}

impl<A: PortalApi> ProjectBoard<A> {
    pub fn new(api: A, session: Session) -> Self {
        Self {
            api,
            session,
            state: RefCell::new(BoardState::default()),
            busy: BusyFlag::default(),
            fetches: Cell::new(0),
        }
    }

    // ========================
    // Remote Operations
    // ========================

    /// Refetch the whole collection and replace the local copy.
    ///
    /// Read failures keep the stale collection and are only logged; a
    /// rejected token is the one failure reported. A response that arrives
    /// after a later request was issued is dropped.
    pub async fn refresh(&self) -> Result<(), FlowError> {
        let ticket = self.fetches.get() + 1;
        self.fetches.set(ticket);

        match self.api.list_projects(&self.session).await {
            Ok(_) if self.fetches.get() != ticket => {
                log::debug!("dropping superseded project list");
                Ok(())
            }
            Ok(projects) => {
                log::debug!("loaded {} projects", projects.len());
                self.state.borrow_mut().projects = projects;
                Ok(())
            }
            Err(ApiError::Unauthorized) => {
                log::warn!("project list rejected the session");
                Err(FlowError::SessionExpired)
            }
            Err(err) => {
                log::warn!("failed to fetch projects, keeping last list: {err}");
                Ok(())
            }
        }
    }

    /// Create or update from the draft, then resync and reset the draft.
    /// On failure the draft is kept for a retry.
    pub async fn submit(&self) -> Result<Project, FlowError> {
        let _guard = self.busy.try_acquire().ok_or(FlowError::Busy)?;
        let submitted = self.state.borrow().draft.clone();
        let submission = submitted.submission()?;

        let saved = match &submission {
            Submission::Create(fields) => self.api.create_project(&self.session, fields).await,
            Submission::Update(id, fields) => {
                self.api.update_project(&self.session, *id, fields).await
            }
        };

        match saved {
            Ok(project) => {
                log::info!("saved project {} ('{}')", project.id, project.name());
                {
                    let mut state = self.state.borrow_mut();
                    // Keep a selection made while the request was out
                    if state.draft == submitted {
                        state.draft.reset();
                    }
                }
                self.refresh().await?;
                Ok(project)
            }
            Err(err) => Err(mutation_error(err, FlowError::Save)),
        }
    }

    /// Issue the delete armed by `request_delete`, then resync
    pub async fn confirm_delete(&self) -> Result<(), FlowError> {
        let _guard = self.busy.try_acquire().ok_or(FlowError::Busy)?;
        let id = self
            .state
            .borrow_mut()
            .pending_delete
            .take()
            .ok_or(FlowError::NothingPending)?;

        match self.api.delete_project(&self.session, id).await {
            Ok(()) => {
                log::info!("deleted project {id}");
                {
                    let mut state = self.state.borrow_mut();
                    // The record being edited is gone; a later update would 404
                    if state.draft.editing() == Some(id) {
                        state.draft.reset();
                    }
                }
                self.refresh().await
            }
            Err(err) => Err(mutation_error(err, FlowError::Delete)),
        }
    }

    // ========================
    // Local Operations
    // ========================

    /// Arm a delete; nothing is sent until `confirm_delete`
    pub fn request_delete(&self, id: ProjectId) {
        self.state.borrow_mut().pending_delete = Some(id);
    }

    pub fn cancel_delete(&self) {
        self.state.borrow_mut().pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<ProjectId> {
        self.state.borrow().pending_delete
    }

    pub fn select_for_edit(&self, project: &Project) {
        self.state.borrow_mut().draft.select(project);
    }

    pub fn cancel_edit(&self) {
        self.state.borrow_mut().draft.reset();
    }

    pub fn update_draft(&self, edit: impl FnOnce(&mut ProjectFields)) {
        edit(self.state.borrow_mut().draft.fields_mut());
    }

    pub fn draft(&self) -> Draft {
        self.state.borrow().draft.clone()
    }

    pub fn set_filter(&self, term: &str) {
        self.state.borrow_mut().filter = term.to_string();
    }

    pub fn filter_term(&self) -> String {
        self.state.borrow().filter.clone()
    }

    /// Collection as last fetched, server order
    pub fn projects(&self) -> Vec<Project> {
        self.state.borrow().projects.clone()
    }

    /// What the list shows: newest first, filtered by the current term
    pub fn visible(&self) -> Vec<Project> {
        let state = self.state.borrow();
        filter_by_name(&newest_first(&state.projects), &state.filter)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }
}

fn mutation_error(err: ApiError, fallback: FlowError) -> FlowError {
    if err.is_unauthorized() {
        log::warn!("mutation rejected the session");
        FlowError::SessionExpired
    } else {
        log::warn!("{fallback}: {err}");
        fallback
    }
}

/// The API returns insertion order ascending; display newest first
pub fn newest_first(projects: &[Project]) -> Vec<Project> {
    projects.iter().rev().cloned().collect()
}

/// Case-insensitive substring match on the project name
pub fn filter_by_name(projects: &[Project], term: &str) -> Vec<Project> {
    let needle = term.to_lowercase();
    projects
        .iter()
        .filter(|project| project.name_contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectStatus;
    use crate::testing::{named, valid_session, FakeServer, Fault};
    use chrono::NaiveDate;

    async fn loaded(names: &[&str]) -> ProjectBoard<FakeServer> {
        let board = ProjectBoard::new(FakeServer::with_projects(names), valid_session());
        board.refresh().await.unwrap();
        board
    }

    fn ids(projects: &[Project]) -> Vec<u64> {
        projects.iter().map(|project| project.id.0).collect()
    }

    #[tokio::test]
    async fn test_refresh_replaces_collection() {
        let board = loaded(&["Alpha", "Beta"]).await;
        assert_eq!(ids(&board.projects()), vec![1, 2]);

        board.api.insert(named("Gamma"));
        board.refresh().await.unwrap();
        assert_eq!(ids(&board.projects()), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_stale_list() {
        let board = loaded(&["Alpha"]).await;
        board.api.fail_next(Fault::Status(502));

        assert_eq!(board.refresh().await, Ok(()));
        assert_eq!(board.projects().len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_reports_rejected_session() {
        let board = ProjectBoard::new(FakeServer::with_projects(&["Alpha"]), valid_session());
        board.api.fail_next(Fault::Unauthorized);

        assert_eq!(board.refresh().await, Err(FlowError::SessionExpired));
        assert!(board.projects().is_empty());
    }

    #[tokio::test]
    async fn test_create_adds_exactly_one_record() {
        let board = loaded(&["Alpha"]).await;
        board.update_draft(|fields| {
            fields.project_name = "Beta".into();
            fields.budget = "1200".into();
            fields.demo_date = NaiveDate::from_ymd_opt(2026, 12, 1);
            fields.status = ProjectStatus::Ongoing;
        });
        let expected = board.draft().fields().clone();

        let created = board.submit().await.unwrap();

        let projects = board.projects();
        assert_eq!(projects.len(), 2);
        assert_eq!(created.id, ProjectId(2));
        let matching: Vec<_> = projects.iter().filter(|p| p.fields == expected).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].id, created.id);
        assert_eq!(board.draft(), Draft::default());
        assert_eq!(
            board.api.requests(),
            vec!["GET /api/projects/", "POST /api/projects/", "GET /api/projects/"]
        );
    }

    #[tokio::test]
    async fn test_create_without_name_sends_nothing() {
        let board = loaded(&["Alpha"]).await;
        board.update_draft(|fields| fields.description = "no name".into());

        assert_eq!(board.submit().await, Err(FlowError::MissingName));
        assert_eq!(board.api.request_count(), 1);
        assert_eq!(board.draft().fields().description, "no name");
    }

    #[tokio::test]
    async fn test_failed_create_preserves_draft_and_list() {
        let board = loaded(&["Alpha"]).await;
        board.update_draft(|fields| fields.project_name = "Beta".into());
        let draft = board.draft();
        board.api.fail_next(Fault::Status(400));

        assert_eq!(board.submit().await, Err(FlowError::Save));
        assert_eq!(board.draft(), draft);
        assert_eq!(ids(&board.projects()), vec![1]);
        assert!(!board.is_busy());
    }

    #[tokio::test]
    async fn test_update_replaces_only_that_record() {
        let board = loaded(&["Alpha", "Beta", "Gamma"]).await;
        let before = board.projects();
        board.select_for_edit(&before[1]);
        board.update_draft(|fields| {
            fields.project_name = "Beta v2".into();
            fields.client_name = "Globex".into();
        });
        let expected = board.draft().fields().clone();

        board.submit().await.unwrap();

        let after = board.projects();
        assert_eq!(after.len(), 3);
        assert_eq!(after[1].id, before[1].id);
        assert_eq!(after[1].fields, expected);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert_eq!(board.draft().editing(), None);
    }

    #[tokio::test]
    async fn test_update_is_full_replacement() {
        let server = FakeServer::default();
        server.insert(ProjectFields {
            project_name: "Alpha".into(),
            description: "old description".into(),
            timeline: "Q3".into(),
            ..Default::default()
        });
        let board = ProjectBoard::new(server, valid_session());
        board.refresh().await.unwrap();

        board.select_for_edit(&board.projects()[0]);
        board.update_draft(|fields| fields.description.clear());
        board.submit().await.unwrap();

        let fields = &board.projects()[0].fields;
        assert_eq!(fields.description, "");
        assert_eq!(fields.timeline, "Q3");
    }

    #[tokio::test]
    async fn test_unchanged_update_round_trips() {
        let server = FakeServer::default();
        server.insert(ProjectFields {
            project_name: "Alpha".into(),
            budget: "5000".into(),
            demo_date: NaiveDate::from_ymd_opt(2026, 3, 14),
            reference_person: "Dana".into(),
            status: ProjectStatus::Completed,
            ..Default::default()
        });
        let board = ProjectBoard::new(server, valid_session());
        board.refresh().await.unwrap();
        let original = board.projects()[0].clone();

        board.select_for_edit(&original);
        let saved = board.submit().await.unwrap();

        assert_eq!(saved, original);
        assert_eq!(board.projects(), vec![original]);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_editing() {
        let board = loaded(&["Alpha"]).await;
        board.select_for_edit(&board.projects()[0]);
        board.update_draft(|fields| fields.project_name = "Renamed".into());
        board.api.fail_next(Fault::Status(500));

        assert_eq!(board.submit().await, Err(FlowError::Save));
        assert_eq!(board.draft().editing(), Some(ProjectId(1)));
        assert_eq!(board.draft().fields().project_name, "Renamed");
        assert_eq!(board.projects()[0].name(), "Alpha");
    }

    #[tokio::test]
    async fn test_submit_refused_while_busy() {
        let board = loaded(&["Alpha"]).await;
        board.update_draft(|fields| fields.project_name = "Beta".into());
        let _outstanding = board.busy.try_acquire().unwrap();

        assert_eq!(board.submit().await, Err(FlowError::Busy));
        assert_eq!(board.confirm_delete().await, Err(FlowError::Busy));
        assert_eq!(board.api.request_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_only_that_record() {
        let board = loaded(&["Alpha", "Beta", "Gamma"]).await;
        let before = board.projects();

        board.request_delete(ProjectId(2));
        board.confirm_delete().await.unwrap();

        let after = board.projects();
        assert_eq!(after, vec![before[0].clone(), before[2].clone()]);
        assert_eq!(board.pending_delete(), None);
    }

    #[tokio::test]
    async fn test_delete_needs_confirmation() {
        let board = loaded(&["Alpha"]).await;

        board.request_delete(ProjectId(1));
        assert_eq!(board.pending_delete(), Some(ProjectId(1)));
        board.cancel_delete();

        assert_eq!(board.confirm_delete().await, Err(FlowError::NothingPending));
        assert_eq!(board.api.request_count(), 1);
        assert_eq!(board.projects().len(), 1);
        assert_eq!(board.api.projects().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_list() {
        let board = loaded(&["Alpha", "Beta"]).await;
        board.api.fail_next(Fault::Status(500));

        board.request_delete(ProjectId(1));
        assert_eq!(board.confirm_delete().await, Err(FlowError::Delete));
        assert_eq!(ids(&board.projects()), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_deleting_edited_record_resets_draft() {
        let board = loaded(&["Alpha", "Beta"]).await;
        board.select_for_edit(&board.projects()[0]);

        board.request_delete(ProjectId(1));
        board.confirm_delete().await.unwrap();

        assert_eq!(board.draft(), Draft::default());
    }

    #[tokio::test]
    async fn test_rejected_token_on_mutation() {
        let board = loaded(&["Alpha"]).await;
        board.update_draft(|fields| fields.project_name = "Beta".into());
        board.api.fail_next(Fault::Unauthorized);

        assert_eq!(board.submit().await, Err(FlowError::SessionExpired));
        assert_eq!(board.draft().fields().project_name, "Beta");
    }

    #[tokio::test]
    async fn test_select_and_cancel_stay_local() {
        let board = loaded(&["Alpha"]).await;
        board.select_for_edit(&board.projects()[0]);
        board.cancel_edit();

        assert_eq!(board.draft(), Draft::default());
        assert_eq!(board.api.request_count(), 1);
    }

    #[tokio::test]
    async fn test_filter_scenario() {
        let server = FakeServer::default();
        server.insert(ProjectFields {
            project_name: "Alpha".into(),
            status: ProjectStatus::Pending,
            ..Default::default()
        });
        let board = ProjectBoard::new(server, valid_session());
        board.refresh().await.unwrap();

        board.set_filter("alp");
        assert_eq!(ids(&board.visible()), vec![1]);

        board.set_filter("zzz");
        assert!(board.visible().is_empty());
        assert_eq!(board.projects().len(), 1);
    }

    #[tokio::test]
    async fn test_filter_is_idempotent_and_non_mutating() {
        let board = loaded(&["Alpha", "alphabet", "Beta"]).await;
        let collection = board.projects();

        board.set_filter("ALPHA");
        let first = board.visible();
        board.set_filter("ALPHA");
        let second = board.visible();

        assert_eq!(first, second);
        assert_eq!(ids(&first), vec![2, 1]);
        assert_eq!(board.projects(), collection);
    }

    #[tokio::test]
    async fn test_visible_is_newest_first() {
        let board = loaded(&["Alpha", "Beta", "Gamma"]).await;
        assert_eq!(ids(&board.visible()), vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_selection_during_save_survives() {
        let board = loaded(&["Alpha", "Beta"]).await;
        let beta = board.projects()[1].clone();
        board.update_draft(|fields| fields.project_name = "Gamma".into());
        let release = board.api.hold_next();

        let (saved, ()) = tokio::join!(board.submit(), async {
            tokio::task::yield_now().await;
            board.select_for_edit(&beta);
            release.notify_one();
        });

        assert_eq!(saved.unwrap().name(), "Gamma");
        assert_eq!(board.draft().editing(), Some(beta.id));
        assert_eq!(board.draft().fields(), &beta.fields);
        assert_eq!(board.projects().len(), 3);
    }

    #[tokio::test]
    async fn test_stale_list_response_is_dropped() {
        let board = loaded(&["Alpha"]).await;
        let release = board.api.hold_next();

        let (first, ()) = tokio::join!(board.refresh(), async {
            tokio::task::yield_now().await;
            board.api.insert(named("Beta"));
            board.refresh().await.unwrap();
            release.notify_one();
        });

        assert_eq!(first, Ok(()));
        assert_eq!(ids(&board.projects()), vec![1, 2]);
    }

    #[test]
    fn test_empty_term_matches_everything() {
        let projects = vec![
            Project { id: ProjectId(1), fields: named("Alpha") },
            Project { id: ProjectId(2), fields: named("Beta") },
        ];
        assert_eq!(filter_by_name(&projects, "").len(), 2);
        assert_eq!(filter_by_name(&projects, "BETA").len(), 1);
    }

    #[test]
    fn test_whitespace_is_part_of_the_term() {
        let projects = vec![
            Project { id: ProjectId(1), fields: named("Alpha") },
            Project { id: ProjectId(2), fields: named("Alpha One") },
        ];
        assert!(filter_by_name(&projects, "alpha ").iter().all(|p| p.id == ProjectId(2)));
        assert_eq!(filter_by_name(&projects, "alpha ").len(), 1);
        assert_eq!(filter_by_name(&projects[..1], "   ").len(), 0);
        assert_eq!(filter_by_name(&projects[..1], "alpha ").len(), 0);
    }
}
