//! Clockify REST API client.
//!
//! # Invariants
//! - Every request carries the `X-Api-Key` header.
//! - Non-success statuses surface as `SyncError::Status` with the body text.

use crate::sync::{SyncError, SyncResult};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_CLOCKIFY_BASE_URL: &str = "https://api.clockify.me/api/v1";
const API_KEY_HEADER: &str = "X-Api-Key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the Clockify API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockifyConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Fixed target workspace; when unset the first listed workspace is used.
    pub workspace_id: Option<String>,
}

impl Default for ClockifyConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_CLOCKIFY_BASE_URL.to_string(),
            workspace_id: None,
        }
    }
}

impl ClockifyConfig {
    /// Returns the trimmed API key, if one is set and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Returns the trimmed workspace id, if one is set and non-blank.
    pub fn workspace_id(&self) -> Option<&str> {
        self.workspace_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteWorkspace {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteProject {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteTask {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub name: String,
    pub is_public: bool,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryRequest {
    pub start: String,
    pub end: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

/// Remote operations used by the push sequence.
pub trait ClockifyApi {
    fn list_workspaces(&self) -> SyncResult<Vec<RemoteWorkspace>>;
    fn create_project(&self, workspace_id: &str, request: &ProjectRequest)
        -> SyncResult<RemoteProject>;
    fn create_task(
        &self,
        workspace_id: &str,
        project_id: &str,
        request: &TaskRequest,
    ) -> SyncResult<RemoteTask>;
    fn create_time_entry(&self, workspace_id: &str, request: &TimeEntryRequest) -> SyncResult<()>;
}

impl<T: ClockifyApi + ?Sized> ClockifyApi for &T {
    fn list_workspaces(&self) -> SyncResult<Vec<RemoteWorkspace>> {
        (**self).list_workspaces()
    }

    fn create_project(
        &self,
        workspace_id: &str,
        request: &ProjectRequest,
    ) -> SyncResult<RemoteProject> {
        (**self).create_project(workspace_id, request)
    }

    fn create_task(
        &self,
        workspace_id: &str,
        project_id: &str,
        request: &TaskRequest,
    ) -> SyncResult<RemoteTask> {
        (**self).create_task(workspace_id, project_id, request)
    }

    fn create_time_entry(&self, workspace_id: &str, request: &TimeEntryRequest) -> SyncResult<()> {
        (**self).create_time_entry(workspace_id, request)
    }
}

/// Blocking HTTP implementation of `ClockifyApi`.
///
/// Must not be driven from inside an async runtime worker; callers on tokio
/// run it via `spawn_blocking`.
pub struct HttpClockifyClient {
    client: Client,
    base_url: String,
}

impl HttpClockifyClient {
    pub fn new(config: &ClockifyConfig) -> SyncResult<Self> {
        let api_key = config.api_key().ok_or(SyncError::MissingApiKey)?;
        let mut headers = HeaderMap::new();
        let key_value = HeaderValue::from_str(api_key)
            .map_err(|err| SyncError::Client(format!("invalid API key header: {err}")))?;
        headers.insert(API_KEY_HEADER, key_value);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| SyncError::Client(err.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> SyncResult<T> {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()?;
        Ok(ensure_success(response)?.json::<T>()?)
    }
}

impl ClockifyApi for HttpClockifyClient {
    fn list_workspaces(&self) -> SyncResult<Vec<RemoteWorkspace>> {
        let response = self
            .client
            .get(format!("{}/workspaces", self.base_url))
            .send()?;
        Ok(ensure_success(response)?.json::<Vec<RemoteWorkspace>>()?)
    }

    fn create_project(
        &self,
        workspace_id: &str,
        request: &ProjectRequest,
    ) -> SyncResult<RemoteProject> {
        self.post_json(&format!("/workspaces/{workspace_id}/projects"), request)
    }

    fn create_task(
        &self,
        workspace_id: &str,
        project_id: &str,
        request: &TaskRequest,
    ) -> SyncResult<RemoteTask> {
        self.post_json(
            &format!("/workspaces/{workspace_id}/projects/{project_id}/tasks"),
            request,
        )
    }

    fn create_time_entry(&self, workspace_id: &str, request: &TimeEntryRequest) -> SyncResult<()> {
        let response = self
            .client
            .post(format!(
                "{}/workspaces/{workspace_id}/time-entries",
                self.base_url
            ))
            .json(request)
            .send()?;
        ensure_success(response)?;
        Ok(())
    }
}

fn ensure_success(response: Response) -> SyncResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .unwrap_or_else(|_| "request failed".to_string());
    Err(SyncError::Status {
        status: status.as_u16(),
        body,
    })
}
