//! Graceful shutdown.
//!
//! Shutdown stops the accept loop, gives in-flight requests the grace period
//! to finish, forces whatever is left closed, and finally closes the
//! listener. The close happens whether or not the grace period was enough.

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::error::GatewayError;
use crate::lifecycle::startup::Gateway;
use crate::lifecycle::state::LifecycleState;

/// Grace period given to in-flight requests when no other is configured.
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// How long a forced shutdown may take before the server task is aborted.
const FORCED_SHUTDOWN_WAIT: Duration = Duration::from_secs(1);

/// How the in-flight requests fared during shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every connection finished within the grace period.
    Drained,
    /// The grace period elapsed and remaining connections were abandoned.
    DeadlineElapsed,
}

impl Gateway {
    /// Stop the gateway. Valid once, from `Listening` or `Serving`.
    pub async fn shutdown(&mut self) -> Result<ShutdownOutcome, GatewayError> {
        match self.state {
            LifecycleState::Listening | LifecycleState::Serving => {}
            state => {
                return Err(GatewayError::InvalidState {
                    operation: "shut down",
                    state,
                })
            }
        }

        let grace = self.config.shutdown.grace_period();
        tracing::info!(
            grace_secs = grace.as_secs_f64(),
            connections = self.handle.connection_count(),
            "Shutting down the server"
        );
        self.transition(LifecycleState::ShuttingDown);
        self.handle.graceful_shutdown(None);

        let outcome = match self.server.take() {
            Some(task) => self.drain(task, grace).await,
            None => ShutdownOutcome::Drained,
        };

        self.close_listener();
        self.transition(LifecycleState::Stopped);
        tracing::info!(?outcome, "Server stopped");

        Ok(outcome)
    }

    async fn drain(
        &self,
        mut task: JoinHandle<std::io::Result<()>>,
        grace: Duration,
    ) -> ShutdownOutcome {
        if let Ok(joined) = tokio::time::timeout(grace, &mut task).await {
            log_server_exit(joined);
            return ShutdownOutcome::Drained;
        }

        tracing::warn!(
            connections = self.handle.connection_count(),
            "Grace period elapsed, abandoning in-flight requests"
        );
        self.handle.shutdown();

        match tokio::time::timeout(FORCED_SHUTDOWN_WAIT, &mut task).await {
            Ok(joined) => log_server_exit(joined),
            Err(_) => {
                task.abort();
                let _ = task.await;
            }
        }
        ShutdownOutcome::DeadlineElapsed
    }

    /// Release the listening socket. Safe to call more than once.
    fn close_listener(&mut self) {
        self.listener.take();
        self.handle.shutdown();
        tracing::debug!("Listener closed");
    }
}

fn log_server_exit(joined: Result<std::io::Result<()>, tokio::task::JoinError>) {
    match joined {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!(error = %e, "Server reported an error while shutting down"),
        Err(e) => tracing::warn!(error = %e, "Server task failed while shutting down"),
    }
}
