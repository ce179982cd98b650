//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     (methods, template, handler)
//!     → matcher.rs (compile template into segments)
//!     → router.rs (append to ordered table, or replace same template)
//!     → Freeze as Arc<Router> before serving
//!
//! Incoming request path
//!     → router.rs (scan routes in registration order)
//!     → matcher.rs (match path, collect captures)
//!     → Return: matched Route + captures, or None
//! ```
//!
//! # Design Decisions
//! - Routes compiled at registration, immutable while serving
//! - No regex, no wildcards: literal and `:variable` segments only
//! - Deterministic: first match in registration order wins

pub mod matcher;
pub mod methods;
pub mod router;

pub use matcher::{Captures, PathPattern, Segment};
pub use methods::MethodSet;
pub use router::{BoxError, Handler, HandlerResult, Route, RouteMatch, Router};
