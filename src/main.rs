//! Region check HTTP service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ ┌──────────┐   ┌──────────────────────────────────────────┐
//!                     │  http    │──▶│                 check                     │
//!                     │  server  │   │ decoder → validator → predicate → format │
//!     Client Response │          │◀──│                                          │
//!     ◀────────────── └──────────┘   └──────────────────────────────────────────┘
//!
//!     Cross-cutting: config · observability (tracing, metrics) · lifecycle
//! ```
//!
//! The same pipeline also runs under a CGI host via the `region-cgi` binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use region_check::config::load_or_default;
use region_check::lifecycle::signals::shutdown_on_signal;
use region_check::observability::{init_logging, metrics, LogOutput};
use region_check::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "region-check")]
#[command(about = "Point-in-region check service", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, env = "REGION_CHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability, LogOutput::Stdout);
    tracing::info!("region-check v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        predicate = config.service.predicate.as_str(),
        labels = ?config.service.effective_labels(),
        max_concurrent_requests = config.listener.max_concurrent_requests,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let stop = shutdown.subscribe();
    tokio::spawn(shutdown_on_signal(shutdown));

    HttpServer::new(config).run(listener, stop).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
