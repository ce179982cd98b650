//! Minimal HTTP request router library.
//!
//! Maps request paths to handlers through `:variable` route templates,
//! checked in registration order.

pub mod app;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;

pub use axum::http::{Method, StatusCode};

pub use app::{App, AppError};
pub use config::ServerConfig;
pub use http::{HttpServer, RequestContext, Response};
pub use lifecycle::Shutdown;
pub use routing::{BoxError, HandlerResult, MethodSet, PathPattern, Router};
