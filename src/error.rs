//! API Errors
//!
//! Classification of failed requests and the strings shown to users.

use serde::Deserialize;
use thiserror::Error;

/// Failure of a backend or catalog call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("offline")]
    Offline,
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("forbidden")]
    Forbidden,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("rate limited")]
    RateLimited,
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

/// Pull the backend's `{"error": ...}` (or flask-jwt `{"msg": ...}`) text out of a body
fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.msg))
        .filter(|m| !m.trim().is_empty())
}

impl ApiError {
    /// Map a non-2xx status and its body to an error
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = server_message(body);
        match status {
            401 => ApiError::Unauthorized(message.unwrap_or_else(|| "Session expired".into())),
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound(message.unwrap_or_else(|| "Not found".into())),
            409 => ApiError::Conflict(message.unwrap_or_else(|| "Already exists".into())),
            // flask-jwt answers malformed tokens with 422
            400 | 422 => ApiError::Validation(message.unwrap_or_else(|| "Invalid request".into())),
            429 => ApiError::RateLimited,
            _ => ApiError::Server {
                status,
                message: message.unwrap_or_else(|| "Unexpected server error".into()),
            },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// Whether a manual "Retry" makes sense
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Offline | ApiError::Network(_) | ApiError::Timeout | ApiError::RateLimited => true,
            ApiError::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Text for display in the UI
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Offline => "You appear to be offline. Check your connection and try again.".into(),
            ApiError::Network(_) => "Could not reach the server. Please try again.".into(),
            ApiError::Timeout => "The request took too long. Please try again.".into(),
            ApiError::Unauthorized(_) => "Your session has expired. Please log in again.".into(),
            ApiError::Forbidden => "You are not allowed to do that.".into(),
            ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Validation(msg) => msg.clone(),
            ApiError::RateLimited => "Too many requests. Please wait a moment.".into(),
            ApiError::Server { status, .. } if *status >= 500 => {
                "Something went wrong on our side. Please try again later.".into()
            }
            ApiError::Server { message, .. } => message.clone(),
            ApiError::Decode(_) => "Received an unexpected response from the server.".into(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_uses_server_message() {
        let err = ApiError::from_status(409, r#"{"error": "Username already taken"}"#);
        assert_eq!(err, ApiError::Conflict("Username already taken".into()));
        assert_eq!(err.user_message(), "Username already taken");
    }

    #[test]
    fn test_from_status_jwt_message() {
        let err = ApiError::from_status(401, r#"{"msg": "Token has expired"}"#);
        assert_eq!(err, ApiError::Unauthorized("Token has expired".into()));
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_from_status_non_json_body() {
        let err = ApiError::from_status(502, "<html>Bad Gateway</html>");
        assert!(matches!(err, ApiError::Server { status: 502, .. }));
        assert!(err.is_retryable());
        assert!(err.user_message().contains("our side"));
    }

    #[test]
    fn test_validation_not_retryable() {
        let err = ApiError::from_status(400, r#"{"error": "All fields are required"}"#);
        assert_eq!(err.user_message(), "All fields are required");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_retryable_classes() {
        assert!(ApiError::Offline.is_retryable());
        assert!(ApiError::Timeout.is_retryable());
        assert!(ApiError::RateLimited.is_retryable());
        assert!(!ApiError::Forbidden.is_retryable());
        assert!(!ApiError::from_status(404, "").is_retryable());
    }
}
