//! Request dispatch: route lookup, method check, handler invocation.
//!
//! # Responsibilities
//! - Resolve the route for a request path
//! - Enforce the route's allowed methods
//! - Invoke the handler with captures in template order
//! - Convert every outcome, including handler failures and panics, into a
//!   `Response`
//!
//! # Design Decisions
//! - A method mismatch answers 500, not 405. Existing clients rely on it;
//!   changing it is a behavior change, not a fix
//! - Handler error text is echoed unescaped in the 500 body. This discloses
//!   internals to clients and is kept only for compatibility
//! - Panics are caught here so one bad handler never takes the server down

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use axum::http::{Method, StatusCode};
use thiserror::Error;

use crate::http::request::RequestContext;
use crate::http::response::{escape_html, Response};
use crate::observability::metrics;
use crate::routing::Router;

/// Why a request did not produce a handler response.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No route pattern matches the path.
    #[error("no route matches {path}")]
    RouteNotFound { path: String },

    /// A route matched but does not accept the method.
    #[error("method {method} not allowed for route {template}")]
    MethodNotAllowed { method: Method, template: String },

    /// The handler returned an error or panicked.
    #[error("handler for route {template} failed: {message}")]
    HandlerFailure { template: String, message: String },
}

impl DispatchError {
    /// The template of the route involved, or `-` when nothing matched.
    pub fn route(&self) -> &str {
        match self {
            DispatchError::RouteNotFound { .. } => metrics::UNMATCHED_ROUTE,
            DispatchError::MethodNotAllowed { template, .. }
            | DispatchError::HandlerFailure { template, .. } => template,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            DispatchError::MethodNotAllowed { .. } | DispatchError::HandlerFailure { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The response sent to the client for this error.
    pub fn to_response(&self) -> Response {
        match self {
            DispatchError::RouteNotFound { path } => Response::not_found(format!(
                "<h1>404 not found</h1><p>{} was not found on this server.</p>",
                escape_html(path)
            )),
            DispatchError::MethodNotAllowed { .. } => {
                Response::server_error("<h1>500 Error</h1><p>Method not allowed</p>")
            }
            DispatchError::HandlerFailure { message, .. } => {
                Response::server_error(format!("<h1>500 Error</h1><p>{}</p>", message))
            }
        }
    }
}

/// Maps requests to handlers through a frozen route table.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    router: Arc<Router>,
}

impl Dispatcher {
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Resolve and run the handler for `ctx`.
    pub fn dispatch(&self, ctx: &RequestContext) -> Result<Response, DispatchError> {
        self.dispatch_route(ctx).map(|(_, response)| response)
    }

    /// Like `dispatch`, also yielding the matched route template.
    fn dispatch_route(&self, ctx: &RequestContext) -> Result<(&str, Response), DispatchError> {
        let path = ctx.path();
        let found = self
            .router
            .find(path)
            .ok_or_else(|| DispatchError::RouteNotFound {
                path: path.to_string(),
            })?;

        let route = found.route;
        if !route.methods().contains(ctx.method()) {
            return Err(DispatchError::MethodNotAllowed {
                method: ctx.method().clone(),
                template: route.template().to_string(),
            });
        }

        tracing::debug!(
            request_id = ctx.request_id().unwrap_or("-"),
            route = %route.template(),
            captures = found.captures.len(),
            "Invoking handler"
        );

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            route.handler().call(ctx, found.captures.as_slice())
        }));

        match outcome {
            Ok(Ok(response)) => Ok((route.template(), response)),
            Ok(Err(e)) => Err(DispatchError::HandlerFailure {
                template: route.template().to_string(),
                message: e.to_string(),
            }),
            Err(payload) => Err(DispatchError::HandlerFailure {
                template: route.template().to_string(),
                message: panic_message(payload.as_ref()),
            }),
        }
    }

    /// Dispatch `ctx` and turn the outcome into a response.
    pub fn handle_context(&self, ctx: &RequestContext) -> Response {
        let start = Instant::now();
        let (route, response) = match self.dispatch_route(ctx) {
            Ok((template, response)) => (template.to_string(), response),
            Err(e) => {
                match &e {
                    DispatchError::RouteNotFound { .. } => {
                        tracing::warn!(
                            request_id = ctx.request_id().unwrap_or("-"),
                            path = %ctx.path(),
                            "No route matched"
                        );
                    }
                    DispatchError::MethodNotAllowed { .. } => {
                        tracing::warn!(
                            request_id = ctx.request_id().unwrap_or("-"),
                            error = %e,
                            "Method rejected"
                        );
                    }
                    DispatchError::HandlerFailure { .. } => {
                        tracing::error!(
                            request_id = ctx.request_id().unwrap_or("-"),
                            error = %e,
                            "Handler failed"
                        );
                    }
                }
                (e.route().to_string(), e.to_response())
            }
        };

        metrics::record_request(
            ctx.method().as_str(),
            response.status().as_u16(),
            &route,
            start,
        );
        response
    }

    /// Dispatch a bare (method, path) pair.
    pub fn handle(&self, method: Method, path: &str) -> Response {
        self.handle_context(&RequestContext::new(method, path))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
