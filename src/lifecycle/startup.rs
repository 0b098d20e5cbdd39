//! Startup orchestration.
//!
//! # Responsibilities
//! - Own the listener, the server handle and the server task
//! - Bind the listener, then start serving plain HTTP or TLS on it
//! - Surface unexpected server termination to the caller
//!
//! # Design Decisions
//! - Fail fast: bind and TLS errors are returned, never retried
//! - The server runs on its own task so the caller can wait for a signal

use std::net::SocketAddr;

use axum::Router;
use axum_server::Handle;
use tokio::task::JoinHandle;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::lifecycle::state::LifecycleState;
use crate::net::{tls::load_tls_config, BoundListener};

/// Owner of the listener and server for one process.
pub struct Gateway {
    pub(super) config: GatewayConfig,
    pub(super) state: LifecycleState,
    pub(super) listener: Option<BoundListener>,
    pub(super) local_addr: Option<SocketAddr>,
    pub(super) handle: Handle,
    pub(super) server: Option<JoinHandle<std::io::Result<()>>>,
}

impl Gateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            state: LifecycleState::Configuring,
            listener: None,
            local_addr: None,
            handle: Handle::new(),
            server: None,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Address the listener is bound to, once bound.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Number of connections the server currently holds open.
    pub fn connection_count(&self) -> usize {
        self.handle.connection_count()
    }

    /// Bind the configured address.
    pub async fn bind(&mut self) -> Result<SocketAddr, GatewayError> {
        self.expect_state("bind", LifecycleState::Configuring)?;

        let listener = BoundListener::bind(&self.config.listener).await?;
        let local_addr = listener.local_addr();
        self.listener = Some(listener);
        self.local_addr = Some(local_addr);
        self.transition(LifecycleState::Listening);

        Ok(local_addr)
    }

    /// Start serving `app` on a background task.
    ///
    /// TLS is used when both certificate and key are configured.
    pub async fn serve(&mut self, app: Router) -> Result<(), GatewayError> {
        self.expect_state("serve", LifecycleState::Listening)?;
        let Some(listener) = self.listener.take() else {
            return Err(GatewayError::InvalidState {
                operation: "serve",
                state: self.state,
            });
        };

        let local_addr = listener.local_addr();
        let listener = listener.into_std();
        let handle = self.handle.clone();
        let service = app.into_make_service();

        let tls = match self.config.listener.tls() {
            Some(paths) => Some(load_tls_config(paths).await),
            None => None,
        };

        let task = match tls {
            Some(Ok(tls)) => {
                tracing::info!("listening on https://{}", local_addr);
                tokio::spawn(
                    axum_server::from_tcp_rustls(listener, tls)
                        .handle(handle)
                        .serve(service),
                )
            }
            Some(Err(e)) => {
                self.transition(LifecycleState::Stopped);
                return Err(GatewayError::Tls(e));
            }
            None => {
                tracing::info!("listening on http://{}", local_addr);
                tokio::spawn(axum_server::from_tcp(listener).handle(handle).serve(service))
            }
        };

        self.server = Some(task);
        self.transition(LifecycleState::Serving);
        Ok(())
    }

    /// Resolves only if the server task ends without [`shutdown`](Self::shutdown)
    /// having been called.
    pub async fn wait_stopped(&mut self) -> GatewayError {
        let Some(task) = self.server.as_mut() else {
            return GatewayError::InvalidState {
                operation: "wait for",
                state: self.state,
            };
        };

        let result = task.await;
        self.server = None;
        self.transition(LifecycleState::Stopped);

        match result {
            Ok(Ok(())) => GatewayError::Stopped,
            Ok(Err(e)) => GatewayError::Serve(e),
            Err(e) => GatewayError::Task(e),
        }
    }

    pub(super) fn expect_state(
        &self,
        operation: &'static str,
        expected: LifecycleState,
    ) -> Result<(), GatewayError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(GatewayError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    pub(super) fn transition(&mut self, next: LifecycleState) {
        tracing::debug!(from = %self.state, to = %next, "Lifecycle transition");
        self.state = next;
    }
}
