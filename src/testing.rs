//! Test doubles: an in-memory session store and a fake project server.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::api::PortalApi;
use crate::error::{ApiError, ApiResult};
use crate::models::{Credentials, Project, ProjectFields, ProjectId, TokenPair};
use crate::session::{Session, SessionStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Failure to inject into the next request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Status(u16),
    Unauthorized,
}

impl Fault {
    fn into_error(self) -> ApiError {
        match self {
            Fault::Status(code) => ApiError::Status(code),
            Fault::Unauthorized => ApiError::Unauthorized,
        }
    }
}

/// In-memory stand-in for the REST API. Accepts `admin` / `secret`.
#[derive(Debug)]
pub struct FakeServer {
    projects: RefCell<Vec<Project>>,
    next_id: Cell<u64>,
    fault: Cell<Option<Fault>>,
    requests: RefCell<Vec<String>>,
    hold: RefCell<Option<Rc<Notify>>>,
}

pub const VALID_TOKEN: &str = "valid-access";

impl Default for FakeServer {
    fn default() -> Self {
        Self {
            projects: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            fault: Cell::new(None),
            requests: RefCell::new(Vec::new()),
            hold: RefCell::new(None),
        }
    }
}

impl FakeServer {
    /// Server pre-seeded with projects named in insertion order
    pub fn with_projects(names: &[&str]) -> Self {
        let server = Self::default();
        for name in names {
            server.insert(named(name));
        }
        server
    }

    pub fn insert(&self, fields: ProjectFields) -> Project {
        let id = ProjectId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let project = Project { id, fields };
        self.projects.borrow_mut().push(project.clone());
        project
    }

    /// Fail the next request with `fault`
    pub fn fail_next(&self, fault: Fault) {
        self.fault.set(Some(fault));
    }

    /// Park the next request until the returned handle is notified.
    /// A list request snapshots the collection before parking.
    pub fn hold_next(&self) -> Rc<Notify> {
        let release = Rc::new(Notify::new());
        *self.hold.borrow_mut() = Some(release.clone());
        release
    }

    async fn parked(&self) {
        let release = self.hold.borrow_mut().take();
        if let Some(release) = release {
            release.notified().await;
        }
    }

    pub fn projects(&self) -> Vec<Project> {
        self.projects.borrow().clone()
    }

    /// Requests seen so far, as `METHOD path`
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    fn record(&self, line: String) -> ApiResult<()> {
        self.requests.borrow_mut().push(line);
        match self.fault.take() {
            Some(fault) => Err(fault.into_error()),
            None => Ok(()),
        }
    }

    fn authorize(&self, session: &Session) -> ApiResult<()> {
        if session.access_token() == VALID_TOKEN {
            Ok(())
        } else {
            Err(ApiError::Unauthorized)
        }
    }
}

#[async_trait(?Send)]
impl PortalApi for FakeServer {
    async fn login(&self, credentials: &Credentials) -> ApiResult<TokenPair> {
        self.record("POST /api/login/".into())?;
        if credentials.username == "admin" && credentials.password == "secret" {
            Ok(TokenPair {
                access: VALID_TOKEN.into(),
                refresh: "valid-refresh".into(),
            })
        } else {
            Err(ApiError::Unauthorized)
        }
    }

    async fn list_projects(&self, session: &Session) -> ApiResult<Vec<Project>> {
        self.record("GET /api/projects/".into())?;
        self.authorize(session)?;
        let snapshot = self.projects();
        self.parked().await;
        Ok(snapshot)
    }

    async fn create_project(&self, session: &Session, fields: &ProjectFields) -> ApiResult<Project> {
        self.record("POST /api/projects/".into())?;
        self.authorize(session)?;
        self.parked().await;
        Ok(self.insert(fields.clone()))
    }

    async fn update_project(
        &self,
        session: &Session,
        id: ProjectId,
        fields: &ProjectFields,
    ) -> ApiResult<Project> {
        self.record(format!("PUT /api/projects/{id}/"))?;
        self.authorize(session)?;
        self.parked().await;
        let mut projects = self.projects.borrow_mut();
        let project = projects
            .iter_mut()
            .find(|project| project.id == id)
            .ok_or(ApiError::Status(404))?;
        project.fields = fields.clone();
        Ok(project.clone())
    }

    async fn delete_project(&self, session: &Session, id: ProjectId) -> ApiResult<()> {
        self.record(format!("DELETE /api/projects/{id}/"))?;
        self.authorize(session)?;
        self.parked().await;
        let mut projects = self.projects.borrow_mut();
        let before = projects.len();
        projects.retain(|project| project.id != id);
        if projects.len() == before {
            return Err(ApiError::Status(404));
        }
        Ok(())
    }
}

pub fn named(name: &str) -> ProjectFields {
    ProjectFields {
        project_name: name.to_string(),
        ..Default::default()
    }
}

pub fn valid_session() -> Session {
    Session::new(VALID_TOKEN, Some("valid-refresh".into()))
}
