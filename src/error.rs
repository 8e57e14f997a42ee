//! Unified SDK error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl SdkError {
    /// Whether this is the remote API's "not found" error.
    ///
    /// Not-found is the one expected, recoverable remote failure: callers
    /// use it to decide between create and update.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SdkError::Http(HttpError::NotFound(_)))
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(ApiErrorBody),

    #[error("API error {status}: {error}")]
    Api { status: u16, error: ApiErrorBody },

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited: {0}")]
    RateLimited(ApiErrorBody),

    #[error("Unauthorized: {0}")]
    Unauthorized(ApiErrorBody),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl HttpError {
    /// Classify a non-success response from its status code and body.
    ///
    /// Not-found is recognised by status 404 or by a not-found reason code in
    /// the error payload, whichever the server reports.
    pub fn from_response(status: u16, body: &str) -> Self {
        let error = ApiErrorBody::parse(body);

        if status == 404 || error.is_not_found_reason() {
            return HttpError::NotFound(error);
        }

        match status {
            401 => HttpError::Unauthorized(error),
            429 => HttpError::RateLimited(error),
            400..=499 => HttpError::Api { status, error },
            _ => HttpError::ServerError {
                status,
                body: body.to_string(),
            },
        }
    }
}

/// Authentication and signing errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Cannot read key file {path}: {reason}")]
    KeyFile { path: String, reason: String },

    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("No service account credentials configured")]
    MissingCredentials,
}

// ─── Remote error payload ────────────────────────────────────────────────────

/// Reason codes the API uses for missing resources.
const NOT_FOUND_REASONS: &[&str] = &["notFound", "resourceNotFound"];

/// Structured error returned by the API (`{"error": {...}}`).
///
/// Unparseable bodies are kept verbatim in `message`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiErrorDetail>,
}

/// One entry of the `errors` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

impl ApiErrorBody {
    /// Parse an error body, falling back to the raw text.
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => envelope.error,
            Err(_) => ApiErrorBody {
                message: body.trim().to_string(),
                ..Default::default()
            },
        }
    }

    /// First reason code, if any.
    pub fn reason(&self) -> Option<&str> {
        self.errors.first().map(|e| e.reason.as_str())
    }

    fn is_not_found_reason(&self) -> bool {
        self.errors
            .iter()
            .any(|e| NOT_FOUND_REASONS.contains(&e.reason.as_str()))
            || self.status.as_deref() == Some("NOT_FOUND")
    }
}

impl std::fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.reason() {
            Some(reason) => write!(f, "{} ({})", self.message, reason),
            None => write!(f, "{}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOT_FOUND_BODY: &str = r#"{
        "error": {
            "code": 404,
            "message": "Requested entity was not found.",
            "errors": [{"message": "Requested entity was not found.", "domain": "global", "reason": "resourceNotFound"}],
            "status": "NOT_FOUND"
        }
    }"#;

    #[test]
    fn test_parse_structured_error() {
        let body = ApiErrorBody::parse(NOT_FOUND_BODY);
        assert_eq!(body.code, Some(404));
        assert_eq!(body.reason(), Some("resourceNotFound"));
        assert_eq!(body.status.as_deref(), Some("NOT_FOUND"));
    }

    #[test]
    fn test_parse_falls_back_to_raw_text() {
        let body = ApiErrorBody::parse("upstream exploded\n");
        assert_eq!(body.message, "upstream exploded");
        assert!(body.errors.is_empty());
    }

    #[test]
    fn test_classify_404_as_not_found() {
        let err = HttpError::from_response(404, NOT_FOUND_BODY);
        assert!(matches!(err, HttpError::NotFound(_)));
        assert!(SdkError::from(err).is_not_found());
    }

    #[test]
    fn test_classify_reason_code_as_not_found() {
        let body = r#"{"error": {"code": 400, "message": "gone", "errors": [{"reason": "notFound"}]}}"#;
        assert!(matches!(
            HttpError::from_response(400, body),
            HttpError::NotFound(_)
        ));
    }

    #[test]
    fn test_classify_other_client_error() {
        let body = r#"{"error": {"code": 400, "message": "Invalid classId", "errors": [{"reason": "invalidArgument"}]}}"#;
        match HttpError::from_response(400, body) {
            HttpError::Api { status, error } => {
                assert_eq!(status, 400);
                assert_eq!(error.reason(), Some("invalidArgument"));
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(!SdkError::from(HttpError::from_response(400, body)).is_not_found());
    }

    #[test]
    fn test_classify_server_and_rate_limit() {
        assert!(matches!(
            HttpError::from_response(503, "unavailable"),
            HttpError::ServerError { status: 503, .. }
        ));
        let quota = r#"{"error": {"code": 429, "message": "Quota exceeded", "errors": [{"reason": "rateLimitExceeded"}]}}"#;
        match HttpError::from_response(429, quota) {
            HttpError::RateLimited(error) => assert_eq!(error.reason(), Some("rateLimitExceeded")),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            HttpError::from_response(401, "{}"),
            HttpError::Unauthorized(_)
        ));
    }
}
