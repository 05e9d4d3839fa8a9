use thiserror::Error;

use crate::model::status::Status;

#[derive(Debug, Error)]
pub enum ClickUpError {
    #[error("signature mismatch")]
    SignatureMismatch,

    /// `what` names the payload being parsed ("webhook" or "task").
    #[error("could not parse {what} body: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not send request to the remote API: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("remote service returned status {code}")]
    RemoteStatus { code: u16 },

    #[error("could not create update request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("task status was not updated (requested \"{requested}\")")]
    StatusNotUpdated {
        requested: Status,
        actual: Option<Status>,
    },

    #[error("task id must not be empty")]
    MissingTaskId,
}

impl ClickUpError {
    pub(crate) fn decode(what: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| ClickUpError::Decode { what, source }
    }

    /// HTTP status code when the remote service answered with something other than 200.
    pub fn remote_status(&self) -> Option<u16> {
        match self {
            ClickUpError::RemoteStatus { code } => Some(*code),
            _ => None,
        }
    }
}

pub type ClickUpResult<T> = Result<T, ClickUpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_status_message_carries_code() {
        let err = ClickUpError::RemoteStatus { code: 401 };
        assert_eq!(err.to_string(), "remote service returned status 401");
        assert_eq!(err.remote_status(), Some(401));
    }

    #[test]
    fn decode_message_names_the_payload() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ClickUpError::decode("task")(source);
        assert!(err.to_string().starts_with("could not parse task body: "));
        assert_eq!(err.remote_status(), None);
    }

    #[test]
    fn status_not_updated_message() {
        let err = ClickUpError::StatusNotUpdated {
            requested: Status::Acceptance,
            actual: Some(Status::ReadyForDevelopment),
        };
        assert!(err.to_string().starts_with("task status was not updated"));
    }
}
