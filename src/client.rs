use std::io::Read;

use async_trait::async_trait;
use tracing::warn;

use crate::config::Config;
use crate::error::{ClickUpError, ClickUpResult};
use crate::gateway::{TaskGateway, API_URL};
use crate::model::task::{Task, TaskUpdateRequest};
use crate::model::webhook::Webhook;
use crate::{signature, webhook};

/// Everything an application needs from ClickUp.
///
/// Code that depends on this trait rather than on [`Client`] can be tested
/// against [`crate::mock::MockClient`].
#[async_trait]
pub trait ClickUp: Send + Sync {
    /// Check a delivery's signature against the raw, undecoded body.
    fn verify_signature(&self, signature: &str, body: &[u8]) -> ClickUpResult<()>;

    /// Decode a webhook body. The reader is consumed and dropped.
    fn parse_webhook(&self, body: Box<dyn Read + Send + '_>) -> ClickUpResult<Webhook>;

    async fn get_task(&self, task_id: &str) -> ClickUpResult<Task>;

    /// Fails with `StatusNotUpdated` if a requested status did not stick.
    async fn update_task(&self, task_id: &str, update: &TaskUpdateRequest) -> ClickUpResult<()>;
}

/// Live client backed by the ClickUp HTTP API.
#[derive(Clone)]
pub struct Client {
    webhook_secret: String,
    gateway: TaskGateway,
}

impl Client {
    pub fn new(api_key: impl Into<String>, webhook_secret: impl Into<String>) -> Self {
        Self {
            webhook_secret: webhook_secret.into(),
            gateway: TaskGateway::new(api_key.into(), API_URL.to_string()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            webhook_secret: config.webhook_secret.clone(),
            gateway: TaskGateway::new(config.api_key.clone(), config.base_url.clone()),
        }
    }

    /// Use a preconfigured HTTP client, e.g. one with a request timeout.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.gateway = self.gateway.with_http_client(http);
        self
    }

    pub fn base_url(&self) -> &str {
        self.gateway.base_url()
    }
}

#[async_trait]
impl ClickUp for Client {
    fn verify_signature(&self, signature: &str, body: &[u8]) -> ClickUpResult<()> {
        if self.webhook_secret.is_empty() {
            warn!("no webhook secret configured; rejecting signature");
            return Err(ClickUpError::SignatureMismatch);
        }
        signature::verify(signature, body, &self.webhook_secret).inspect_err(|_| {
            warn!(body_len = body.len(), "webhook signature mismatch");
        })
    }

    fn parse_webhook(&self, body: Box<dyn Read + Send + '_>) -> ClickUpResult<Webhook> {
        webhook::decode(body)
    }

    async fn get_task(&self, task_id: &str) -> ClickUpResult<Task> {
        self.gateway.get_task(task_id).await
    }

    async fn update_task(&self, task_id: &str, update: &TaskUpdateRequest) -> ClickUpResult<()> {
        self.gateway.update_task(task_id, update).await
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("webhook_secret", &"[REDACTED]")
            .field("gateway", &self.gateway)
            .finish()
    }
}
