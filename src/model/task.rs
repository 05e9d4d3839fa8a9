use serde::{Deserialize, Serialize};

use super::status::Status;

/// A task as returned by `GET /task/{id}` and `PUT /task/{id}`.
///
/// The service sends far more fields than these; the rest are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Task {
    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref().map(|s| &s.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub status: Status,
}

/// Sparse body for `PUT /task/{id}`.
///
/// Only fields that are `Some` go on the wire. The service treats a present but
/// empty field as "clear it", so nothing here may default to a zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    /// Milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_estimate: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<AssigneesUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssigneesUpdate {
    pub add: Vec<i64>,
    pub rem: Vec<i64>,
}

impl AssigneesUpdate {
    /// User ids present in both `add` and `rem`.
    pub fn overlap(&self) -> Vec<i64> {
        self.add
            .iter()
            .filter(|id| self.rem.contains(id))
            .copied()
            .collect()
    }
}

impl TaskUpdateRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<Status>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_time_estimate(mut self, millis: i64) -> Self {
        self.time_estimate = Some(millis);
        self
    }

    pub fn with_archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    pub fn assign(mut self, user_id: i64) -> Self {
        self.assignees.get_or_insert_with(Default::default).add.push(user_id);
        self
    }

    pub fn unassign(mut self, user_id: i64) -> Self {
        self.assignees.get_or_insert_with(Default::default).rem.push(user_id);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
