//! OpenAlex MCP Server - Entry Point
//!
//! Provides both stdio and HTTP transports.

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use openalex_mcp::config::{self, Config};
use openalex_mcp::{OpenAlexClient, server::McpServer};

#[derive(Parser, Debug)]
#[command(name = "openalex-mcp")]
#[command(about = "MCP server for the OpenAlex API")]
#[command(version)]
struct Cli {
    /// Transport mode: stdio or http
    #[arg(long, default_value = "stdio")]
    transport: Transport,

    /// HTTP server port (only used with --transport http)
    #[arg(long, default_value = "8000", env = "PORT")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = config::env::LOG_LEVEL)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// OpenAlex API base URL
    #[arg(long, env = config::env::API_BASE_URL)]
    api_base_url: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long, env = config::env::API_TIMEOUT, value_parser = parse_timeout)]
    api_timeout: Option<Duration>,

    /// Contact email sent to OpenAlex for polite API usage
    #[arg(long, env = config::env::CONTACT_EMAIL)]
    contact_email: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum Transport {
    /// Standard input/output
    #[default]
    Stdio,
    /// Stateless HTTP (POST /mcp)
    Http,
}

fn parse_timeout(raw: &str) -> Result<Duration, String> {
    config::parse_timeout(raw).map_err(|e| e.to_string())
}

impl Cli {
    /// Layer CLI flags over the environment-derived configuration.
    fn into_config(self, mut config: Config) -> (Config, Transport, u16, bool) {
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(url) = self.api_base_url {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(timeout) = self.api_timeout {
            config.request_timeout = timeout;
        }
        if let Some(email) = self.contact_email {
            config.contact_email = email;
        }
        (config, self.transport, self.port, self.json_logs)
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let (config, transport, port, json_logs) = cli.into_config(Config::from_env()?);

    init_tracing(&config.log_level, json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        app_name = %config.app_name,
        transport = ?transport,
        api_base_url = %config.api_base_url,
        timeout = ?config.request_timeout,
        "Starting OpenAlex MCP server"
    );

    let client = OpenAlexClient::new(&config)?;
    let server = McpServer::new(client, config.app_name.clone());

    match transport {
        Transport::Stdio => server.run_stdio().await?,
        Transport::Http => {
            tracing::info!(port, "Running in HTTP mode");
            server.run_http(port).await?;
        }
    }

    Ok(())
}
