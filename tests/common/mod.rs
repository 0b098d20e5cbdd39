//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use address_gateway::config::{ApiKey, GatewayConfig, ListenerConfig};
use address_gateway::{build_router, AddressNormalizer, Gateway, ParsedComponent};

pub const API_KEY: &str = "integration-test-key";

/// Normalizer returning fixed results and recording every query it sees.
#[derive(Default)]
pub struct StubNormalizer {
    pub expansions: Vec<String>,
    pub components: Vec<ParsedComponent>,
    pub delay: Option<Duration>,
    seen: Mutex<Vec<String>>,
}

impl StubNormalizer {
    pub fn with_expansions(expansions: &[&str]) -> Self {
        Self {
            expansions: expansions.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_components(components: &[(&str, &str)]) -> Self {
        Self {
            components: components
                .iter()
                .map(|(label, value)| ParsedComponent::new(*label, *value))
                .collect(),
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            expansions: vec!["slow".to_string()],
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }

    fn record(&self, query: &str) {
        self.seen.lock().unwrap().push(query.to_string());
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
    }
}

impl AddressNormalizer for StubNormalizer {
    fn expand_address(&self, query: &str) -> Vec<String> {
        self.record(query);
        self.expansions.clone()
    }

    fn parse_address(&self, query: &str) -> Vec<ParsedComponent> {
        self.record(query);
        self.components.clone()
    }
}

/// Loopback config on an ephemeral port with the test key.
pub fn test_config() -> GatewayConfig {
    let mut config = GatewayConfig {
        listener: ListenerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            ..ListenerConfig::default()
        },
        ..GatewayConfig::default()
    };
    config.auth.api_key = ApiKey::new(API_KEY);
    config
}

/// Bind and start a gateway serving `normalizer`.
pub async fn start_gateway(
    config: GatewayConfig,
    normalizer: Arc<StubNormalizer>,
) -> (Gateway, SocketAddr) {
    let app = build_router(&config, normalizer);
    let mut gateway = Gateway::new(config);
    let addr = gateway.bind().await.unwrap();
    gateway.serve(app).await.unwrap();
    (gateway, addr)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
