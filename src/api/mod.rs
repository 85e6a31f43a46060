//! REST API Bindings
//!
//! `PortalApi` is the seam between the flows and the network. The app uses
//! `HttpApi`; tests use an in-memory fake.

mod http;

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::models::{Credentials, Project, ProjectFields, ProjectId, TokenPair};
use crate::session::Session;

pub use http::HttpApi;

pub const LOGIN_PATH: &str = "/api/login/";
pub const PROJECTS_PATH: &str = "/api/projects/";

/// Path of a single project resource
pub fn project_path(id: ProjectId) -> String {
    format!("{PROJECTS_PATH}{id}/")
}

/// Remote operations the portal consumes.
///
/// Futures are `?Send`: everything runs on the browser's single thread.
#[async_trait(?Send)]
pub trait PortalApi {
    /// Exchange credentials for a token pair
    async fn login(&self, credentials: &Credentials) -> ApiResult<TokenPair>;

    /// Full project collection, server order
    async fn list_projects(&self, session: &Session) -> ApiResult<Vec<Project>>;

    /// Create a project; the server assigns the id
    async fn create_project(&self, session: &Session, fields: &ProjectFields) -> ApiResult<Project>;

    /// Replace every field of an existing project
    async fn update_project(
        &self,
        session: &Session,
        id: ProjectId,
        fields: &ProjectFields,
    ) -> ApiResult<Project>;

    async fn delete_project(&self, session: &Session, id: ProjectId) -> ApiResult<()>;
}
