//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → per-request spans from tower-http's TraceLayer, tagged with x-request-id
//!
//! Consumers:
//!     → stdout via tracing-subscriber's fmt layer
//! ```

pub mod logging;

pub use logging::init_logging;
