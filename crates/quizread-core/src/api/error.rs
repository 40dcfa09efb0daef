use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized - session is no longer valid")]
    Unauthorized,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Structured error payload the backend returns on failures
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    /// Extract the backend's `{"error": "..."}` message when present,
    /// otherwise fall back to the (truncated) raw body.
    fn body_message(body: &str) -> String {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) if !parsed.error.is_empty() => parsed.error,
            _ => Self::truncate_body(body),
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = Self::body_message(body);
        match status.as_u16() {
            400 => ApiError::InvalidRequest(message),
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound(message),
            409 => ApiError::Conflict(message),
            500..=599 => ApiError::ServerError(message),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, ""),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_REQUEST, "bad email"),
            ApiError::InvalidRequest(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, "no such user"),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::CONFLICT, "exists"),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            ApiError::ServerError(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::IM_A_TEAPOT, "???"),
            ApiError::InvalidResponse(_)
        ));
    }

    #[test]
    fn test_structured_error_body_is_extracted() {
        let err = ApiError::from_status(
            StatusCode::CONFLICT,
            r#"{"error": "Email already registered"}"#,
        );
        match err {
            ApiError::Conflict(msg) => assert_eq!(msg, "Email already registered"),
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_long_body_is_truncated() {
        let body = "x".repeat(2000);
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body);
        let text = err.to_string();
        assert!(text.contains("truncated"));
        assert!(text.len() < 700);
    }
}
