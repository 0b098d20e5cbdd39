//! OS signal handling.
//!
//! # Responsibilities
//! - Wait for the first SIGINT (or SIGTERM on Unix)
//! - Report which one arrived so the caller can start shutdown
//!
//! # Design Decisions
//! - A single receive, not a loop: a second signal gets no special handling
//! - Uses Tokio's signal handling (async-safe)

/// Signal that triggered shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

/// Wait for a shutdown signal.
///
/// Fails only if a signal handler cannot be installed.
pub async fn shutdown_signal() -> std::io::Result<ShutdownSignal> {
    let signal = wait_for_signal().await?;
    tracing::info!(signal = ?signal, "Shutdown signal received");
    Ok(signal)
}

#[cfg(unix)]
async fn wait_for_signal() -> std::io::Result<ShutdownSignal> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result.map(|()| ShutdownSignal::Interrupt),
        _ = terminate.recv() => Ok(ShutdownSignal::Terminate),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> std::io::Result<ShutdownSignal> {
    tokio::signal::ctrl_c().await?;
    Ok(ShutdownSignal::Interrupt)
}
