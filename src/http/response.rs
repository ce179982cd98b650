//! Response values produced by handlers and the dispatcher.
//!
//! # Responsibilities
//! - Carry a status code and raw body bytes
//! - Provide the canonical 200 / 404 / 500 constructors
//! - Convert into an axum response for the transport
//!
//! # Design Decisions
//! - No Content-Type header is set here; bodies are HTML by convention only
//! - Bodies are bytes so handlers are not forced into UTF-8

use std::borrow::Cow;

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// A status code plus body, created per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    body: Vec<u8>,
}

impl Response {
    /// `200 OK` with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::with_status(StatusCode::OK, body)
    }

    /// `404 Not Found` with the given body.
    pub fn not_found(body: impl Into<Vec<u8>>) -> Self {
        Self::with_status(StatusCode::NOT_FOUND, body)
    }

    /// `500 Internal Server Error` with the given body.
    pub fn server_error(body: impl Into<Vec<u8>>) -> Self {
        Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, body)
    }

    pub fn with_status(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as UTF-8, lossily.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        (self.status, Body::from(self.body)).into_response()
    }
}

/// Escape text for safe inclusion in an HTML body.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_statuses() {
        assert_eq!(Response::ok("a").status(), StatusCode::OK);
        assert_eq!(Response::not_found("b").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            Response::server_error("c").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(Response::ok("hello").body_text(), "hello");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;"
        );
        assert_eq!(escape_html("/plain/path"), "/plain/path");
    }

    #[test]
    fn into_response_sets_no_content_type() {
        let response = Response::not_found("gone").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get("content-type").is_none());
    }
}
