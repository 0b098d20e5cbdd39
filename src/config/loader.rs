//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{ApiKey, BodyDecoding, GatewayConfig};

pub const ENV_LISTEN_HOST: &str = "LISTEN_HOST";
pub const ENV_LISTEN_PORT: &str = "LISTEN_PORT";
pub const ENV_SSL_CERT_FILE: &str = "SSL_CERT_FILE";
pub const ENV_SSL_KEY_FILE: &str = "SSL_KEY_FILE";
pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_BODY_DECODING: &str = "BODY_DECODING";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve the full configuration: defaults, then the optional file, then the
/// process environment.
pub fn resolve_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    apply_env(&mut config, |name| std::env::var(name).ok())?;
    Ok(config)
}

/// Overlay environment variables onto `config`.
///
/// `lookup` returns the raw value of a variable. Empty values count as unset.
pub fn apply_env<F>(config: &mut GatewayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

    if let Some(host) = get(ENV_LISTEN_HOST) {
        config.listener.host = host;
    }

    if let Some(port) = get(ENV_LISTEN_PORT) {
        config.listener.port = port.trim().parse().map_err(|e: std::num::ParseIntError| {
            ConfigError::InvalidEnv {
                name: ENV_LISTEN_PORT,
                value: port.clone(),
                reason: e.to_string(),
            }
        })?;
    }

    if let Some(cert) = get(ENV_SSL_CERT_FILE) {
        config.listener.cert_file = Some(PathBuf::from(cert));
    }

    if let Some(key) = get(ENV_SSL_KEY_FILE) {
        config.listener.key_file = Some(PathBuf::from(key));
    }

    if let Some(api_key) = get(ENV_API_KEY) {
        config.auth.api_key = ApiKey::new(api_key);
    }

    if let Some(mode) = get(ENV_BODY_DECODING) {
        config.requests.body_decoding =
            mode.parse::<BodyDecoding>()
                .map_err(|reason| ConfigError::InvalidEnv {
                    name: ENV_BODY_DECODING,
                    value: mode.clone(),
                    reason,
                })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn env_overrides_defaults() {
        let mut config = GatewayConfig::default();
        apply_env(
            &mut config,
            env(&[
                ("LISTEN_HOST", "127.0.0.1"),
                ("LISTEN_PORT", "9443"),
                ("SSL_CERT_FILE", "/etc/tls/cert.pem"),
                ("SSL_KEY_FILE", "/etc/tls/key.pem"),
                ("API_KEY", "s3cret"),
                ("BODY_DECODING", "strict"),
            ]),
        )
        .unwrap();

        assert_eq!(config.listener.listen_spec(), "127.0.0.1:9443");
        assert!(config.listener.tls().is_some());
        assert_eq!(config.auth.api_key, ApiKey::new("s3cret"));
        assert_eq!(config.requests.body_decoding, BodyDecoding::Strict);
    }

    #[test]
    fn unset_port_falls_back_to_default() {
        let mut config = GatewayConfig::default();
        apply_env(&mut config, env(&[("LISTEN_PORT", "")])).unwrap();
        assert_eq!(config.listener.port, 8080);
        assert_eq!(config.listener.bind_host(), "0.0.0.0");
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let mut config = GatewayConfig::default();
        let err = apply_env(&mut config, env(&[("LISTEN_PORT", "http")])).unwrap_err();
        match err {
            ConfigError::InvalidEnv { name, value, .. } => {
                assert_eq!(name, "LISTEN_PORT");
                assert_eq!(value, "http");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn only_cert_does_not_enable_tls() {
        let mut config = GatewayConfig::default();
        apply_env(&mut config, env(&[("SSL_CERT_FILE", "cert.pem")])).unwrap();
        assert!(config.listener.tls().is_none());
    }

    #[test]
    fn file_values_survive_empty_env() {
        let mut file = tempfile_path("file_values_survive_empty_env");
        writeln!(
            file.1,
            "[listener]\nport = 7000\n\n[auth]\napi_key = \"from-file\"\n\n[shutdown]\ngrace_period_secs = 3"
        )
        .unwrap();

        let mut config = load_config(&file.0).unwrap();
        apply_env(&mut config, env(&[("API_KEY", "")])).unwrap();

        assert_eq!(config.listener.port, 7000);
        assert_eq!(config.auth.api_key, ApiKey::new("from-file"));
        assert_eq!(config.shutdown.grace_period_secs, 3);
        assert_eq!(config.observability.log_level, "info");

        let _ = std::fs::remove_file(&file.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/address-gateway.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    fn tempfile_path(name: &str) -> (PathBuf, std::fs::File) {
        let path = std::env::temp_dir().join(format!(
            "address-gateway-{}-{}.toml",
            name,
            std::process::id()
        ));
        let file = std::fs::File::create(&path).unwrap();
        (path, file)
    }
}
