//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, request ID, in-flight limit)
//!     → request.rs (method, path, request ID → RequestContext)
//!     → dispatcher.rs (route lookup, method check, handler call)
//!     → response.rs (status + body → wire response)
//!     → Send to client
//! ```

pub mod dispatcher;
pub mod request;
pub mod response;
pub mod server;

pub use dispatcher::{DispatchError, Dispatcher};
pub use request::{RequestContext, X_REQUEST_ID};
pub use response::{escape_html, Response};
pub use server::HttpServer;
