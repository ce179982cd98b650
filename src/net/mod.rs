//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig
//!     → listener.rs (parse address, bind)
//!     → Hand off to HTTP layer (axum serve loop)
//! ```

pub mod listener;

pub use listener::{bind, ListenerError};
