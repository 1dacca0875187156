//! Error type for backend API calls.
//!
//! The backend reports failures as JSON bodies with a `detail` (FastAPI style)
//! or `message` field. Every error carries a human-readable message suitable
//! for direct display; there is no retry or recovery machinery.

use reqwest::{Response, StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, DNS).
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{0}")]
    Backend(String),

    /// The backend answered 2xx but the body was not what we expected.
    #[error("Unexpected response from server: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Build a `Backend` error from a non-success response, consuming its body.
    pub async fn from_response(resp: Response) -> Self {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        ApiError::Backend(backend_message(status, &body))
    }
}

/// Extract the display message from an error body.
///
/// Prefers the JSON `detail` field, then `message`, then falls back to the
/// HTTP status line. Non-JSON bodies are ignored rather than shown raw.
fn backend_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["detail", "message"] {
            if let Some(msg) = json.get(field).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => format!("HTTP error! status: {}", status.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_detail_field() {
        let msg = backend_message(
            StatusCode::UNAUTHORIZED,
            r#"{"detail": "Incorrect username or password"}"#,
        );
        assert_eq!(msg, "Incorrect username or password");
    }

    #[test]
    fn test_backend_message_message_field() {
        let msg = backend_message(
            StatusCode::BAD_REQUEST,
            r#"{"message": "Registration failed"}"#,
        );
        assert_eq!(msg, "Registration failed");
    }

    #[test]
    fn test_backend_message_detail_wins_over_message() {
        let msg = backend_message(
            StatusCode::BAD_REQUEST,
            r#"{"detail": "from detail", "message": "from message"}"#,
        );
        assert_eq!(msg, "from detail");
    }

    #[test]
    fn test_backend_message_non_json_falls_back_to_status() {
        let msg = backend_message(StatusCode::BAD_GATEWAY, "<html>nginx</html>");
        assert_eq!(msg, "502 Bad Gateway");
    }

    #[test]
    fn test_backend_message_json_without_known_fields() {
        let msg = backend_message(StatusCode::NOT_FOUND, r#"{"error": "nope"}"#);
        assert_eq!(msg, "404 Not Found");
    }

    #[test]
    fn test_backend_message_unknown_status_code() {
        let status = StatusCode::from_u16(599).unwrap();
        let msg = backend_message(status, "");
        assert_eq!(msg, "HTTP error! status: 599");
    }
}
