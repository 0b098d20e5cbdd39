use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use address_gateway::config::{resolve_config, validation::check_config};
use address_gateway::lifecycle::{shutdown_signal, Gateway};
use address_gateway::observability::init_logging;
use address_gateway::{build_router, BasicNormalizer};

#[derive(Parser)]
#[command(name = "address-gateway")]
#[command(about = "HTTP gateway for address expansion and parsing", long_about = None)]
struct Cli {
    /// Optional TOML config file. Environment variables override it.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref())?;

    init_logging(&config.observability);

    tracing::info!("address-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    for warning in check_config(&config) {
        tracing::warn!(%warning, "Configuration warning");
    }

    tracing::info!(
        listen = %config.listener.listen_spec(),
        tls = config.listener.tls().is_some(),
        body_decoding = ?config.requests.body_decoding,
        shutdown_grace_secs = config.shutdown.grace_period_secs,
        "Configuration loaded"
    );

    let app = build_router(&config, Arc::new(BasicNormalizer::new()));
    let mut gateway = Gateway::new(config);

    if let Err(e) = gateway.bind().await {
        tracing::error!(error = %e, "Failed to bind listener");
        return Err(e.into());
    }
    gateway.serve(app).await?;

    tokio::select! {
        signal = shutdown_signal() => {
            signal?;
        }
        e = gateway.wait_stopped() => {
            tracing::error!(error = %e, "Server terminated unexpectedly");
            return Err(e.into());
        }
    }

    gateway.shutdown().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
