//! TCP listener binding.
//!
//! # Responsibilities
//! - Resolve and bind the configured host/port
//! - Hand a non-blocking std listener to the server task
//!
//! # Design Decisions
//! - Bind failure is reported, never retried
//! - Hostnames are resolved by the socket layer (`localhost` works)

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
#[error("failed to bind {address}: {source}")]
pub struct BindError {
    pub address: String,
    #[source]
    pub source: std::io::Error,
}

/// A bound listener ready to be served.
#[derive(Debug)]
pub struct BoundListener {
    inner: std::net::TcpListener,
    local_addr: SocketAddr,
}

impl BoundListener {
    /// Bind to the configured address.
    pub async fn bind(config: &ListenerConfig) -> Result<Self, BindError> {
        let address = config.listen_spec();
        let bind_err = |source| BindError {
            address: address.clone(),
            source,
        };

        let listener = TcpListener::bind((config.bind_host(), config.port))
            .await
            .map_err(bind_err)?;
        let local_addr = listener.local_addr().map_err(bind_err)?;
        let inner = listener.into_std().map_err(bind_err)?;

        tracing::info!(address = %local_addr, "Listener bound");

        Ok(Self { inner, local_addr })
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn into_std(self) -> std::net::TcpListener {
        self.inner
    }
}
