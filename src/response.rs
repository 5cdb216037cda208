use std::collections::BTreeMap;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::warn;

/// Headers merged into every envelope.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type"),
    ("Access-Control-Allow-Methods", "OPTIONS,POST"),
];

const JSON_CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

#[derive(Serialize)]
struct SuccessBody {
    success: bool,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
}

/// Status, headers and body handed back to the inbound caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ResponseEnvelope {
    /// Build an envelope with the CORS set merged over `headers`.
    /// `body` is serialized as JSON; `None` leaves the body empty.
    pub fn build<T: Serialize>(
        status_code: u16,
        headers: impl IntoIterator<Item = (String, String)>,
        body: Option<&T>,
    ) -> Self {
        let mut merged: BTreeMap<String, String> = headers.into_iter().collect();
        for (name, value) in CORS_HEADERS {
            merged.insert(name.to_string(), value.to_string());
        }

        let body = match body {
            Some(value) => serde_json::to_string(value).unwrap_or_else(|e| {
                warn!("Failed to serialize response body: {}", e);
                String::new()
            }),
            None => String::new(),
        };

        Self {
            status_code,
            headers: merged,
            body,
        }
    }

    fn json_headers() -> [(String, String); 1] {
        [(JSON_CONTENT_TYPE.0.to_string(), JSON_CONTENT_TYPE.1.to_string())]
    }

    /// Pre-flight answer: 200 with no body.
    pub fn preflight() -> Self {
        Self::build::<()>(200, Self::json_headers(), None)
    }

    pub fn success() -> Self {
        Self::build(200, Self::json_headers(), Some(&SuccessBody { success: true }))
    }

    pub fn error(status_code: u16, message: &str) -> Self {
        Self::build(
            status_code,
            Self::json_headers(),
            Some(&ErrorBody {
                success: false,
                error: message,
            }),
        )
    }

    /// Plain-text envelope, used by the webhook surface.
    pub fn text(status_code: u16, body: &str) -> Self {
        let mut envelope = Self::build::<()>(
            status_code,
            [("Content-Type".to_string(), "text/plain; charset=utf-8".to_string())],
            None,
        );
        envelope.body = body.to_string();
        envelope
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();
        let headers = response.headers_mut();
        for (name, value) in &self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!("Dropping invalid response header: {}", name),
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_cors(envelope: &ResponseEnvelope) {
        assert_eq!(envelope.header("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(
            envelope.header("Access-Control-Allow-Headers"),
            Some("Content-Type")
        );
        assert_eq!(
            envelope.header("Access-Control-Allow-Methods"),
            Some("OPTIONS,POST")
        );
    }

    #[test]
    fn test_success_body() {
        let envelope = ResponseEnvelope::success();
        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.body, r#"{"success":true}"#);
        assert_eq!(envelope.header("Content-Type"), Some("application/json"));
        assert_cors(&envelope);
    }

    #[test]
    fn test_error_body_shape() {
        let envelope = ResponseEnvelope::error(400, "Missing required fields");
        assert_eq!(envelope.status_code, 400);
        assert_eq!(
            envelope.body,
            r#"{"success":false,"error":"Missing required fields"}"#
        );
        assert_cors(&envelope);
    }

    #[test]
    fn test_preflight_is_empty() {
        let envelope = ResponseEnvelope::preflight();
        assert_eq!(envelope.status_code, 200);
        assert!(envelope.body.is_empty());
        assert_cors(&envelope);
    }

    #[test]
    fn test_cors_overrides_caller_headers() {
        let envelope = ResponseEnvelope::build::<()>(
            204,
            [
                (
                    "Access-Control-Allow-Origin".to_string(),
                    "https://evil.example".to_string(),
                ),
                ("X-Trace".to_string(), "abc".to_string()),
            ],
            None,
        );
        assert_cors(&envelope);
        assert_eq!(envelope.header("X-Trace"), Some("abc"));
    }

    #[test]
    fn test_text_envelope_keeps_cors() {
        let envelope = ResponseEnvelope::text(200, "OK");
        assert_eq!(envelope.body, "OK");
        assert_eq!(
            envelope.header("Content-Type"),
            Some("text/plain; charset=utf-8")
        );
        assert_cors(&envelope);
    }

    #[test]
    fn test_into_response_copies_headers() {
        let response = ResponseEnvelope::error(500, "Server configuration error").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
    }
}
