use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Workflow status of a task.
///
/// The well-known statuses of our workspace have their own variants. Any other
/// value the service sends is kept verbatim in `Other`, so statuses compare by
/// their exact string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    ReadyForDevelopment,
    InDevelopment,
    InDevelopmentClubhouse,
    Acceptance,
    Other(String),
}

impl Status {
    pub const KNOWN: [Status; 4] = [
        Status::ReadyForDevelopment,
        Status::InDevelopment,
        Status::InDevelopmentClubhouse,
        Status::Acceptance,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Status::ReadyForDevelopment => "ready for development",
            Status::InDevelopment => "in development",
            Status::InDevelopmentClubhouse => "in development (clubhouse)",
            Status::Acceptance => "acceptance",
            Status::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Status::Other(_))
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        Status::KNOWN
            .into_iter()
            .find(|s| s.as_str() == value)
            .unwrap_or(Status::Other(value))
    }
}

impl From<&str> for Status {
    fn from(value: &str) -> Self {
        Status::from(value.to_string())
    }
}

impl From<Status> for String {
    fn from(value: Status) -> Self {
        match value {
            Status::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Status {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Status::from(s))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
