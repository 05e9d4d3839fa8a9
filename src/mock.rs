use std::io::Read;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::client::ClickUp;
use crate::error::{ClickUpError, ClickUpResult};
use crate::model::task::{Task, TaskUpdateRequest};
use crate::model::webhook::Webhook;

/// Deterministic stand-in for [`crate::Client`]; never touches the network.
///
/// Failure switches map onto the same errors the live client produces, so
/// callers exercise their real error handling.
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    task: Task,
    webhook: Webhook,
    reject_signatures: bool,
    reject_webhooks: bool,
    get_task_status: Option<u16>,
    update_task_status: Option<u16>,
    ignore_status_updates: bool,
    updates: Arc<Mutex<Vec<(String, TaskUpdateRequest)>>>,
}

impl MockClient {
    /// `task` is returned by `get_task` and is the state `update_task` checks against.
    pub fn new(task: Task) -> Self {
        Self {
            task,
            ..Self::default()
        }
    }

    /// Returned by `parse_webhook`, whatever the body holds.
    pub fn with_webhook(mut self, webhook: Webhook) -> Self {
        self.webhook = webhook;
        self
    }

    pub fn with_rejected_signatures(mut self) -> Self {
        self.reject_signatures = true;
        self
    }

    pub fn with_rejected_webhooks(mut self) -> Self {
        self.reject_webhooks = true;
        self
    }

    /// Make `get_task` fail with `RemoteStatus` carrying `code`.
    pub fn with_get_task_status(mut self, code: u16) -> Self {
        self.get_task_status = Some(code);
        self
    }

    /// Make `update_task` fail with `RemoteStatus` carrying `code`.
    pub fn with_update_task_status(mut self, code: u16) -> Self {
        self.update_task_status = Some(code);
        self
    }

    /// Answer every status change with `StatusNotUpdated`, as a workflow rule would.
    pub fn ignoring_status_updates(mut self) -> Self {
        self.ignore_status_updates = true;
        self
    }

    /// Every update accepted so far, oldest first. Shared between clones.
    pub fn updates(&self) -> Vec<(String, TaskUpdateRequest)> {
        self.recorded().clone()
    }

    // A panic elsewhere while holding the lock must not lose recorded calls.
    fn recorded(&self) -> MutexGuard<'_, Vec<(String, TaskUpdateRequest)>> {
        self.updates.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ClickUp for MockClient {
    fn verify_signature(&self, _signature: &str, _body: &[u8]) -> ClickUpResult<()> {
        if self.reject_signatures {
            return Err(ClickUpError::SignatureMismatch);
        }
        Ok(())
    }

    fn parse_webhook(&self, body: Box<dyn Read + Send + '_>) -> ClickUpResult<Webhook> {
        drop(body);
        if self.reject_webhooks {
            let source = <serde_json::Error as serde::de::Error>::custom("rejected by mock client");
            return Err(ClickUpError::Decode {
                what: "webhook",
                source,
            });
        }
        Ok(self.webhook.clone())
    }

    async fn get_task(&self, task_id: &str) -> ClickUpResult<Task> {
        if task_id.trim().is_empty() {
            return Err(ClickUpError::MissingTaskId);
        }
        if let Some(code) = self.get_task_status {
            return Err(ClickUpError::RemoteStatus { code });
        }
        Ok(self.task.clone())
    }

    async fn update_task(&self, task_id: &str, update: &TaskUpdateRequest) -> ClickUpResult<()> {
        if task_id.trim().is_empty() {
            return Err(ClickUpError::MissingTaskId);
        }
        if let Some(code) = self.update_task_status {
            return Err(ClickUpError::RemoteStatus { code });
        }
        self.recorded().push((task_id.to_string(), update.clone()));
        if let Some(requested) = &update.status {
            if self.ignore_status_updates && self.task.status() != Some(requested) {
                return Err(ClickUpError::StatusNotUpdated {
                    requested: requested.clone(),
                    actual: self.task.status().cloned(),
                });
            }
        }
        Ok(())
    }
}
