//! Server lifecycle states.

use std::fmt;

/// Where a [`Gateway`](super::Gateway) is in its life.
///
/// Transitions only move forward:
/// `Configuring → Listening → Serving → ShuttingDown → Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifecycleState {
    /// Configuration resolved, nothing bound yet.
    Configuring,
    /// Listener bound, server not yet running.
    Listening,
    /// Server task running and accepting connections.
    Serving,
    /// No longer accepting; waiting for in-flight requests.
    ShuttingDown,
    /// Listener closed.
    Stopped,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Configuring => "configuring",
            LifecycleState::Listening => "listening",
            LifecycleState::Serving => "serving",
            LifecycleState::ShuttingDown => "shutting down",
            LifecycleState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}
