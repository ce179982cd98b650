//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (app.rs):
//!     Load config → Register routes → Freeze router → Bind → Serve
//!
//! Shutdown (shutdown.rs):
//!     stop() or signal → Stop accepting → Finish in-flight request → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
