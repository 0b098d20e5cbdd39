//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Derive the default filter from the configured log level
//!
//! # Design Decisions
//! - `RUST_LOG` always wins over the config file
//! - Credentials never reach a log line: the `Authorization` header is marked
//!   sensitive and the API key's `Debug` is redacted

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::schema::ObservabilityConfig;

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(level: &str) -> String {
    format!("address_gateway={level},tower_http={level}")
}

/// Install the global subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(&config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_covers_crate_and_http_layer() {
        assert_eq!(
            default_filter("debug"),
            "address_gateway=debug,tower_http=debug"
        );
    }
}
