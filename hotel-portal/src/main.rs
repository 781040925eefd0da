//! hotel-portal - command-line front desk
//!
//! Signs in against the hotel backend, keeps the session in the data
//! directory and exposes the booking wizard, the status boards, room
//! maintenance, guest check-in/out, incidents and reports as subcommands.

mod commands;
mod config;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use commands::{Command, Portal};
use config::PortalConfig;

#[derive(Parser, Debug)]
#[command(name = "hotel-portal")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Backend API root (overrides HOTEL_API_BASE_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Directory for the session, preferences, logs and exports
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Debug-level logging when RUST_LOG is not set
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn config(&self) -> PortalConfig {
        let mut config = PortalConfig::from_env();
        if let Some(url) = &self.api_url {
            config.base_url = url.clone();
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = cli.config();
    let _guard = logging::init(&config.log_dir(), cli.verbose)?;
    tracing::debug!(base_url = %config.base_url, data_dir = %config.data_dir.display(), "Starting hotel-portal");

    let mut portal = Portal::open(config)?;
    portal.run(cli.command).await
}
