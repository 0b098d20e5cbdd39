//! Process-level errors.

use thiserror::Error;

use crate::config::ConfigError;
use crate::lifecycle::LifecycleState;
use crate::net::BindError;

/// Errors that stop the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error("failed to load TLS configuration: {0}")]
    Tls(#[source] std::io::Error),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error("server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("server stopped without a shutdown request")]
    Stopped,

    #[error("cannot {operation} the gateway while {state}")]
    InvalidState {
        operation: &'static str,
        state: LifecycleState,
    },
}
