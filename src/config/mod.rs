//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults
//!     → loader.rs (optional TOML file, then environment overlay)
//!     → validation.rs (startup warnings)
//!     → GatewayConfig (immutable for the process lifetime)
//!     → shared by the listener, auth layer and handlers
//! ```
//!
//! # Design Decisions
//! - Config is resolved once at startup; there is no reload
//! - All fields have defaults to allow an empty environment
//! - Empty environment variables are treated as unset

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_env, load_config, resolve_config, ConfigError};
pub use schema::{ApiKey, BodyDecoding, GatewayConfig, ListenerConfig};
