//! Single-target HTTP relay.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request     ┌──────────────────────────────────────────────┐
//!     ───────────────────┼─▶ axum server ─▶ fault guard ─▶ forwarder ───┼──▶ Upstream
//!                        │   (request id,    (502 / 500)    (reqwest,   │     (fixed
//!     Client Response    │    trace span)                    timeout)   │      target)
//!     ◀──────────────────┼── relay: headers → status → streamed body ◀──┼───
//!                        └──────────────────────────────────────────────┘
//! ```
//!
//! Every inbound request, whatever its path, is forwarded once to the
//! configured target URL and the upstream response is relayed back.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use upstream_relay::config::{load_config, validation::validate_config, ConfigError, RelayConfig};
use upstream_relay::http::HttpServer;
use upstream_relay::lifecycle::{signals, Shutdown};
use upstream_relay::observability::logging;

#[derive(Parser)]
#[command(name = "upstream-relay")]
#[command(about = "Forward every HTTP request to one upstream URL", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override `upstream.target_url`.
    #[arg(short, long)]
    target: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(target) = cli.target {
        config.upstream.target_url = target;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init(&config.observability)?;

    tracing::info!("upstream-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        target = %config.upstream.target_url,
        forward_request_headers = config.upstream.forward_request_headers,
        forward_request_body = config.upstream.forward_request_body,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        signal_shutdown.trigger();
    });

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
