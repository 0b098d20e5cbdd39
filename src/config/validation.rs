//! Configuration checks.
//!
//! Nothing here is fatal: the gateway runs with any configuration that parsed,
//! but some combinations deserve a loud warning at startup.

use std::fmt;

use crate::config::schema::GatewayConfig;

/// A configuration smell reported at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No API key is set; every request will be rejected.
    EmptyApiKey,
    /// Only one of certificate/key is set; the listener serves plain HTTP.
    IncompleteTls { missing: &'static str },
    /// A zero grace period abandons in-flight requests immediately.
    ZeroGracePeriod,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::EmptyApiKey => {
                write!(f, "API key is empty, all requests will be rejected")
            }
            ConfigWarning::IncompleteTls { missing } => {
                write!(f, "TLS {} file not set, serving plain HTTP", missing)
            }
            ConfigWarning::ZeroGracePeriod => {
                write!(f, "shutdown grace period is zero, in-flight requests will be dropped")
            }
        }
    }
}

/// Collect every warning for `config`.
pub fn check_config(config: &GatewayConfig) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.auth.api_key.is_empty() {
        warnings.push(ConfigWarning::EmptyApiKey);
    }

    match (&config.listener.cert_file, &config.listener.key_file) {
        (Some(_), None) => warnings.push(ConfigWarning::IncompleteTls { missing: "key" }),
        (None, Some(_)) => warnings.push(ConfigWarning::IncompleteTls { missing: "certificate" }),
        _ => {}
    }

    if config.shutdown.grace_period_secs == 0 {
        warnings.push(ConfigWarning::ZeroGracePeriod);
    }

    warnings
}
