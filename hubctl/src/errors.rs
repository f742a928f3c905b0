use reqwest::StatusCode;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// A required field was missing or an operation was attempted in the wrong state.
    /// Raised before any network call is made.
    #[error("{message}")]
    Validation { message: String },

    /// The API answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response (connection refused, timeout, bad URL)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation { message: message.into() }
    }

    /// Build an API error from a status code and the raw response body.
    ///
    /// An empty body falls back to the canonical reason phrase for the status.
    pub fn from_response(status: u16, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown status")
                .to_string()
        } else {
            body.to_string()
        };
        Error::Api { status, message }
    }

    /// HTTP status for API errors, `None` for everything else.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Message suitable for showing to the person driving the CLI
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation { message } => message.clone(),
            Error::Api { status, message } => {
                // FastAPI wraps errors as {"detail": "..."}; unwrap that when present
                let detail = serde_json::from_str::<serde_json::Value>(message)
                    .ok()
                    .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string));
                match detail {
                    Some(detail) => format!("{detail} (HTTP {status})"),
                    None => format!("{message} (HTTP {status})"),
                }
            }
            Error::Transport(e) if e.is_timeout() => "The API did not answer in time".to_string(),
            Error::Transport(_) => "Could not reach the API".to_string(),
            Error::Decode(_) => "The API returned an unexpected response".to_string(),
            Error::Other(e) => format!("{e:#}"),
        }
    }
}

/// Type alias for client operation results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_keeps_body_text() {
        let err = Error::from_response(409, "Já existe usuário com este email.");
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.to_string(), "API error 409: Já existe usuário com este email.");
    }

    #[test]
    fn test_api_error_falls_back_to_reason_phrase() {
        let err = Error::from_response(503, "");
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_user_message_unwraps_detail() {
        let err = Error::from_response(404, r#"{"detail":"Projeto não encontrado."}"#);
        assert_eq!(err.user_message(), "Projeto não encontrado. (HTTP 404)");
    }

    #[test]
    fn test_validation_is_not_an_api_error() {
        let err = Error::validation("Title is required");
        assert!(err.is_validation());
        assert_eq!(err.status(), None);
        assert_eq!(err.user_message(), "Title is required");
    }
}
