use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{RequestBuilder, StatusCode};
use tracing::{debug, instrument, warn};

use crate::error::{ClickUpError, ClickUpResult};
use crate::model::task::{Task, TaskUpdateRequest};

pub const API_URL: &str = "https://api.clickup.com/api/v2";

/// Authenticated access to `/task/{id}`.
///
/// Every call is a single round trip: no retries, no caching. Timeouts come
/// from the `reqwest::Client` handed to [`TaskGateway::with_http_client`].
#[derive(Clone)]
pub struct TaskGateway {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl TaskGateway {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn task_url(&self, task_id: &str) -> ClickUpResult<String> {
        if task_id.trim().is_empty() {
            return Err(ClickUpError::MissingTaskId);
        }
        Ok(format!(
            "{}/task/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(task_id)
        ))
    }

    async fn send(&self, request: RequestBuilder) -> ClickUpResult<Task> {
        let resp = request
            .header(AUTHORIZATION, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(ClickUpError::Transport)?;

        let status = resp.status();
        debug!(status = status.as_u16(), "remote API responded");
        if status != StatusCode::OK {
            return Err(ClickUpError::RemoteStatus {
                code: status.as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(ClickUpError::Transport)?;
        serde_json::from_slice(&body).map_err(ClickUpError::decode("task"))
    }

    #[instrument(skip(self))]
    pub async fn get_task(&self, task_id: &str) -> ClickUpResult<Task> {
        let url = self.task_url(task_id)?;
        self.send(self.client.get(url)).await
    }

    /// Apply a sparse update, then confirm the requested status took effect.
    ///
    /// The service answers 200 even when a workflow rule refuses a status
    /// transition, so the returned task is the only evidence of the outcome.
    #[instrument(skip(self, update), fields(status = update.status.as_ref().map(|s| s.as_str())))]
    pub async fn update_task(
        &self,
        task_id: &str,
        update: &TaskUpdateRequest,
    ) -> ClickUpResult<()> {
        let url = self.task_url(task_id)?;

        if let Some(assignees) = &update.assignees {
            let overlap = assignees.overlap();
            if !overlap.is_empty() {
                warn!(?overlap, "assignees are both added and removed");
            }
        }

        let body = serde_json::to_vec(update).map_err(ClickUpError::Encode)?;
        let task = self.send(self.client.put(url).body(body)).await?;

        if let Some(requested) = &update.status {
            let actual = task.status();
            if actual.map(|s| s.as_str()) != Some(requested.as_str()) {
                warn!(
                    requested = %requested,
                    actual = actual.map(|s| s.as_str()).unwrap_or(""),
                    "task status was not updated"
                );
                return Err(ClickUpError::StatusNotUpdated {
                    requested: requested.clone(),
                    actual: actual.cloned(),
                });
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for TaskGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskGateway")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}
