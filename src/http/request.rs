//! Request context handed to route handlers.
//!
//! # Responsibilities
//! - Carry the routing-relevant parts of a request (method, path)
//! - Carry the request ID assigned by the transport for log correlation
//!
//! # Design Decisions
//! - The path excludes the query string; the core never parses queries
//! - Request ID is optional so the dispatcher can run without a transport

use axum::http::{HeaderMap, Method};

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// What a handler gets to see of the incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    method: Method,
    path: String,
    request_id: Option<String>,
}

impl RequestContext {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            request_id: None,
        }
    }

    /// Attach the request ID found in `headers`, if any.
    pub fn with_headers(mut self, headers: &HeaderMap) -> Self {
        self.request_id = headers
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }
}
