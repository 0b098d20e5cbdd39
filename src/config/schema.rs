//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::lifecycle::shutdown::DEFAULT_SHUTDOWN_GRACE;

/// Port used when neither the config file nor `LISTEN_PORT` sets one.
pub const DEFAULT_PORT: u16 = 8080;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, TLS).
    pub listener: ListenerConfig,

    /// Bearer token authentication.
    pub auth: AuthConfig,

    /// Request body handling.
    pub requests: RequestConfig,

    /// Graceful shutdown settings.
    pub shutdown: ShutdownConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Host to bind. Empty binds all interfaces.
    pub host: String,

    /// Port to bind.
    pub port: u16,

    /// Path to the TLS certificate chain (PEM).
    pub cert_file: Option<PathBuf>,

    /// Path to the TLS private key (PEM).
    pub key_file: Option<PathBuf>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            cert_file: None,
            key_file: None,
        }
    }
}

impl ListenerConfig {
    /// Host actually handed to the socket layer.
    pub fn bind_host(&self) -> &str {
        if self.host.is_empty() {
            "0.0.0.0"
        } else {
            &self.host
        }
    }

    /// `host:port` as shown in logs, IPv6 literals bracketed.
    pub fn listen_spec(&self) -> String {
        let host = self.bind_host();
        if host.contains(':') && !host.starts_with('[') {
            format!("[{}]:{}", host, self.port)
        } else {
            format!("{}:{}", host, self.port)
        }
    }

    /// TLS paths, present only when both certificate and key are configured.
    pub fn tls(&self) -> Option<TlsPaths<'_>> {
        match (&self.cert_file, &self.key_file) {
            (Some(cert), Some(key)) => Some(TlsPaths { cert, key }),
            _ => None,
        }
    }
}

/// Borrowed certificate and key locations.
#[derive(Debug, Clone, Copy)]
pub struct TlsPaths<'a> {
    pub cert: &'a PathBuf,
    pub key: &'a PathBuf,
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared secret compared against bearer tokens.
    pub api_key: ApiKey,
}

/// Shared secret. Never printed.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// How request bodies that fail to decode are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyDecoding {
    /// Malformed bodies are treated as an empty query.
    #[default]
    Permissive,
    /// Malformed bodies are rejected with 400 Bad Request.
    Strict,
}

impl std::str::FromStr for BodyDecoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            other => Err(format!("expected `permissive` or `strict`, got `{}`", other)),
        }
    }
}

/// Request handling configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RequestConfig {
    pub body_decoding: BodyDecoding,
}

/// Shutdown configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Time in-flight requests get to finish once shutdown starts.
    pub grace_period_secs: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            grace_period_secs: DEFAULT_SHUTDOWN_GRACE.as_secs(),
        }
    }
}

impl ShutdownConfig {
    pub fn grace_period(&self) -> Duration {
        Duration::from_secs(self.grace_period_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` overrides it.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
