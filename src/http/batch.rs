//! Batch framing: many insert calls in one `multipart/mixed` request.
//!
//! Each part of the request embeds one HTTP request; each part of the
//! response embeds one HTTP response. Parts succeed or fail independently.

use serde::Serialize;
use serde_json::Value;

use crate::domain::WalletResource;
use crate::error::{ApiErrorBody, HttpError};

/// One embedded request of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRequest {
    pub method: &'static str,
    /// Absolute path on the API host, e.g. `/walletobjects/v1/transitObject`.
    pub path: String,
    pub body: Value,
}

impl BatchRequest {
    /// An insert of `resource` into its collection under `api_path`.
    pub fn insert<R: WalletResource>(api_path: &str, resource: &R) -> Result<Self, serde_json::Error> {
        Self::post(format!("{}/{}", api_path, R::collection()), resource)
    }

    pub fn post<B: Serialize>(path: String, body: &B) -> Result<Self, serde_json::Error> {
        Ok(Self {
            method: "POST",
            path,
            body: serde_json::to_value(body)?,
        })
    }
}

/// Outcome of one embedded request.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItemResult {
    /// `Content-ID` of the response part, without angle brackets.
    pub content_id: Option<String>,
    /// Embedded HTTP status; 0 when the part carries no readable status line.
    pub status: u16,
    /// The created resource, or the structured error for this item only.
    pub outcome: Result<Value, ApiErrorBody>,
}

impl BatchItemResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// `id` of the created resource.
    pub fn id(&self) -> Option<&str> {
        self.outcome.as_ref().ok()?.get("id")?.as_str()
    }
}

/// A fresh multipart boundary.
pub fn new_boundary() -> String {
    format!("batch_{}", uuid::Uuid::new_v4().simple())
}

/// `multipart/mixed; boundary=…` for `boundary`.
pub fn content_type(boundary: &str) -> String {
    format!("multipart/mixed; boundary={}", boundary)
}

/// Serialize `requests` into a multipart body delimited by `boundary`.
pub fn encode_batch(boundary: &str, requests: &[BatchRequest]) -> String {
    let mut body = String::new();
    for (index, request) in requests.iter().enumerate() {
        body.push_str(&format!("--{}\r\n", boundary));
        body.push_str("Content-Type: application/http\r\n");
        body.push_str(&format!("Content-ID: <item{}>\r\n\r\n", index + 1));
        body.push_str(&format!("{} {} HTTP/1.1\r\n", request.method, request.path));
        body.push_str("Content-Type: application/json\r\n\r\n");
        body.push_str(&request.body.to_string());
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{}--\r\n", boundary));
    body
}

/// Extract the boundary parameter of a `multipart/mixed` content type.
pub fn boundary_of(content_type: &str) -> Result<String, HttpError> {
    let mime: mime::Mime = content_type
        .parse()
        .map_err(|e| HttpError::InvalidResponse(format!("Bad batch content type '{}': {}", content_type, e)))?;

    if mime.type_() != mime::MULTIPART {
        return Err(HttpError::InvalidResponse(format!(
            "Expected a multipart batch response, got '{}'",
            content_type
        )));
    }

    mime.get_param(mime::BOUNDARY)
        .map(|b| b.as_str().to_string())
        .ok_or_else(|| HttpError::InvalidResponse("Batch response has no boundary".to_string()))
}

/// Parse a multipart batch response into per-item results, in response order.
///
/// Only an unusable envelope is an error. A part that cannot be read becomes
/// a failed item and the remaining parts are still returned.
pub fn parse_batch_response(content_type: &str, body: &str) -> Result<Vec<BatchItemResult>, HttpError> {
    let boundary = boundary_of(content_type)?;
    let delimiter = format!("--{}", boundary);
    let normalized = body.replace("\r\n", "\n");

    let mut results = Vec::new();
    // Everything before the first delimiter is preamble.
    for part in normalized.split(delimiter.as_str()).skip(1) {
        if part.starts_with("--") {
            break;
        }
        let part = part.trim_start_matches('\n');
        if part.trim().is_empty() {
            continue;
        }
        results.push(parse_part(part));
    }
    Ok(results)
}

fn parse_part(part: &str) -> BatchItemResult {
    let (outer_headers, embedded) = split_headers(part);

    let content_id = outer_headers
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-id"))
        .map(|(_, value)| {
            value
                .trim()
                .trim_start_matches('<')
                .trim_end_matches('>')
                .to_string()
        });

    let (status_and_headers, payload) = split_headers(embedded.trim_start());
    let status_line = status_and_headers.lines().next().unwrap_or_default();
    let status = match status_line
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse::<u16>().ok())
    {
        Some(status) => status,
        None => {
            return BatchItemResult {
                content_id,
                status: 0,
                outcome: Err(ApiErrorBody {
                    message: format!("Bad status line in batch part: '{}'", status_line),
                    ..Default::default()
                }),
            }
        }
    };

    let payload = payload.trim();
    let outcome = if (200..300).contains(&status) {
        if payload.is_empty() {
            Ok(Value::Null)
        } else {
            serde_json::from_str(payload).map_err(|_| ApiErrorBody::parse(payload))
        }
    } else {
        Err(ApiErrorBody::parse(payload))
    };

    BatchItemResult {
        content_id,
        status,
        outcome,
    }
}

/// Split at the first blank line into (headers, rest).
fn split_headers(text: &str) -> (&str, &str) {
    text.split_once("\n\n").unwrap_or((text, ""))
}
