//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig
//!     → listener.rs (bind host:port, fatal on failure)
//!     → tls.rs (optional: cert + key → RustlsConfig)
//!     → lifecycle serves plain HTTP or TLS over the same socket
//! ```
//!
//! # Design Decisions
//! - TLS only when both certificate and key are configured
//! - One listener per process

pub mod listener;
pub mod tls;

pub use listener::{BindError, BoundListener};
