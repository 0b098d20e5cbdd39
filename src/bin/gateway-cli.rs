use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Command-line client for the address gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[arg(short, long, env = "API_KEY", hide_env_values = true)]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the gateway is up
    Health,
    /// Expand an address into normalized variants
    Expand { query: String },
    /// Parse an address into labeled components
    Parse { query: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let res = match cli.command {
        Commands::Health => {
            client
                .get(format!("{}/health", base))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Expand { query } => {
            client
                .post(format!("{}/expand", base))
                .headers(headers)
                .json(&json!({ "query": query }))
                .send()
                .await?
        }
        Commands::Parse { query } => {
            client
                .post(format!("{}/parser", base))
                .headers(headers)
                .json(&json!({ "query": query }))
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    println!("Status: {}", status);
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }

    if !status.is_success() {
        return Err(format!("gateway returned {}", status).into());
    }
    Ok(())
}
