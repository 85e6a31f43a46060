//! HTTP Client
//!
//! `reqwest` implementation of `PortalApi`. On `wasm32` reqwest drives the
//! browser's `fetch`.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{project_path, PortalApi, LOGIN_PATH, PROJECTS_PATH};
use crate::config::PortalConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{Credentials, Project, ProjectFields, ProjectId, TokenPair};
use crate::session::Session;

#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    config: PortalConfig,
}

impl HttpApi {
    pub fn new(config: PortalConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn authorized(&self, builder: RequestBuilder, session: &Session) -> RequestBuilder {
        builder.header(AUTHORIZATION, bearer(session))
    }

    async fn send(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            log::debug!("request failed with status {}", status.as_u16());
            Err(ApiError::from_status(status.as_u16()))
        }
    }
}

#[async_trait(?Send)]
impl PortalApi for HttpApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<TokenPair> {
        let request = self
            .client
            .post(self.config.endpoint(LOGIN_PATH))
            .json(credentials);
        read_json(self.send(request).await?).await
    }

    async fn list_projects(&self, session: &Session) -> ApiResult<Vec<Project>> {
        let request = self.client.get(self.config.endpoint(PROJECTS_PATH));
        let response = self.send(self.authorized(request, session)).await?;
        let rows: Vec<Value> = read_json(response).await?;
        Ok(decode_projects(rows))
    }

    async fn create_project(&self, session: &Session, fields: &ProjectFields) -> ApiResult<Project> {
        let request = self
            .client
            .post(self.config.endpoint(PROJECTS_PATH))
            .json(fields);
        let response = self.send(self.authorized(request, session)).await?;
        read_json(response).await
    }

    async fn update_project(
        &self,
        session: &Session,
        id: ProjectId,
        fields: &ProjectFields,
    ) -> ApiResult<Project> {
        let request = self
            .client
            .put(self.config.endpoint(&project_path(id)))
            .json(fields);
        let response = self.send(self.authorized(request, session)).await?;
        read_json(response).await
    }

    async fn delete_project(&self, session: &Session, id: ProjectId) -> ApiResult<()> {
        let request = self.client.delete(self.config.endpoint(&project_path(id)));
        self.send(self.authorized(request, session)).await?;
        Ok(())
    }
}

fn bearer(session: &Session) -> String {
    format!("Bearer {}", session.access_token())
}

async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Decode list rows one by one; a row that does not decode is logged and
/// left out so the rest of the list still shows
fn decode_projects(rows: Vec<Value>) -> Vec<Project> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<Project>(row) {
            Ok(project) => Some(project),
            Err(err) => {
                log::warn!("[API] Skipping project row: {err}");
                None
            }
        })
        .collect()
}
