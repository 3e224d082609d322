//! CGI entry point: answers exactly one request, then exits.
//!
//! Configuration comes from `REGION_CHECK_CONFIG` (or `--config`); the
//! request itself from the CGI environment and stdin.

use std::io;
use std::path::PathBuf;

use clap::Parser;

use region_check::cgi::{serve_one, CgiRequest};
use region_check::config::load_or_default;
use region_check::observability::{init_logging, LogOutput};
use region_check::CheckService;

#[derive(Parser)]
#[command(name = "region-cgi")]
#[command(about = "Point-in-region check as a CGI program", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, env = "REGION_CHECK_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;
    init_logging(&config.observability, LogOutput::Stderr);

    let service = CheckService::new(&config.service);
    let request = CgiRequest::from_env();
    tracing::debug!(?request, framing = ?config.service.framing, "CGI request received");

    serve_one(
        &service,
        &request,
        config.security.max_body_size,
        io::stdin().lock(),
        io::stdout().lock(),
    )?;
    Ok(())
}
