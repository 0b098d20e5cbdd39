//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Gateway::new(config) → bind() → serve(router)
//!
//! Signals (signals.rs):
//!     SIGINT / SIGTERM → caller invokes Gateway::shutdown() once
//!
//! Shutdown (shutdown.rs):
//!     Stop accepting → wait for in-flight requests (bounded) → close listener
//! ```
//!
//! # Design Decisions
//! - One owner object holds the listener, server handle and server task
//! - States only move forward: Configuring → Listening → Serving →
//!   ShuttingDown → Stopped
//! - Shutdown has a deadline; the listener is closed even if it is missed

pub mod shutdown;
pub mod signals;
pub mod startup;
pub mod state;

pub use shutdown::{ShutdownOutcome, DEFAULT_SHUTDOWN_GRACE};
pub use signals::{shutdown_signal, ShutdownSignal};
pub use startup::Gateway;
pub use state::LifecycleState;
