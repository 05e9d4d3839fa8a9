use std::io::Read;

use tracing::debug;

use crate::error::{ClickUpError, ClickUpResult};
use crate::model::webhook::Webhook;

/// Read a whole webhook body and decode it.
///
/// The reader is taken by value, so it is dropped (and whatever it wraps
/// released) on both the success and the error path.
pub fn decode<R: Read>(body: R) -> ClickUpResult<Webhook> {
    let webhook: Webhook =
        serde_json::from_reader(body).map_err(ClickUpError::decode("webhook"))?;
    debug!(webhook_id = %webhook.id, event = %webhook.event, task_id = %webhook.task_id, "decoded webhook");
    Ok(webhook)
}
