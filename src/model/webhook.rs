use serde::{Deserialize, Serialize};
use std::fmt;

/// The action that triggered a webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Event {
    TaskStatusUpdated,
    Other(String),
}

impl Event {
    pub fn as_str(&self) -> &str {
        match self {
            Event::TaskStatusUpdated => "taskStatusUpdated",
            Event::Other(s) => s,
        }
    }
}

impl From<String> for Event {
    fn from(value: String) -> Self {
        if value == "taskStatusUpdated" {
            Event::TaskStatusUpdated
        } else {
            Event::Other(value)
        }
    }
}

impl From<Event> for String {
    fn from(value: Event) -> Self {
        match value {
            Event::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Event {
    fn default() -> Self {
        Event::Other(String::new())
    }
}

/// Keys missing from a delivery are left empty; only events about a task
/// carry a `task_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Webhook {
    #[serde(rename = "webhook_id")]
    pub id: String,
    pub event: Event,
    pub task_id: String,
}
