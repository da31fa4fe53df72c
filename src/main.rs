//! Data processing service.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                DATA PROCESSOR                 │
//!                    │                                               │
//!  POST /api/process │  ┌────────┐   ┌──────────┐   ┌────────────┐  │
//!  ──────────────────┼─▶│  http  │──▶│ handlers │──▶│ processing │  │
//!                    │  │ server │   │ + length │   │ transform  │  │
//!                    │  └────────┘   │  check   │   └─────┬──────┘  │
//!                    │               └──────────┘         │         │
//!  envelope + status │  ┌──────────┐                      │         │
//!  ◀─────────────────┼──│ response │◀─────────────────────┘         │
//!                    │  └──────────┘                                │
//!                    │                                               │
//!                    │   config · observability · lifecycle          │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use data_processor::config::{load_config, validate_config, ConfigError, ServiceConfig};
use data_processor::lifecycle::{signals, Shutdown};
use data_processor::observability::{logging, metrics};
use data_processor::HttpServer;

#[derive(Parser)]
#[command(name = "data-processor")]
#[command(about = "Uppercase-and-truncate text over HTTP", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

fn resolve_config(args: &Args) -> Result<ServiceConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = &args.bind {
        config.listener.bind_address = bind.clone();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    logging::init_logging(&config.observability);

    tracing::info!("data-processor v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        allowed_origin = %config.cors.allowed_origin,
        request_timeout_secs = config.timeouts.request_secs,
        max_input_chars = config.limits.max_input_chars,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown.clone());

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
