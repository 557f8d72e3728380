use serde_json::Value;

/// Message shown when the request never produced a response
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to load products";

/// Failure of a backend request.
///
/// Malformed or non-array success bodies are not errors; they are read as an empty
/// result so the page shows its empty state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status
    #[error("{message}")]
    Status { status: u16, message: String },
}

impl FetchError {
    /// Build a status error, preferring the backend's own `error` message
    pub fn from_status(status: u16, body: &str) -> Self {
        let reported = serde_json::from_str::<Value>(body).ok().and_then(|json| {
            json.get("error").and_then(Value::as_str).map(str::trim).map(str::to_string)
        });

        let message = match reported {
            Some(message) if !message.is_empty() => message,
            _ => format!("Request failed with status {}", status),
        };

        FetchError::Status { status, message }
    }

    /// Text for the error affordance
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Transport(_) => TRANSPORT_FAILURE_MESSAGE.to_string(),
            FetchError::Status { message, .. } => message.clone(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Transport(_) => None,
            FetchError::Status { status, .. } => Some(*status),
        }
    }
}
