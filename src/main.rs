//! Flowgate - HTTP gateway for Gumloop flows
//!
//! Main entry point for the Flowgate CLI and server.

mod cli;
mod server;

use clap::Parser;
use tracing::info;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real environment variables always win.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    server::init_tracing(cli.log_dir.as_deref(), cli.json_logs)?;

    let config = server::load_config(&cli.config)?;

    match cli.command.unwrap_or(Commands::Run {
        host: None,
        port: None,
    }) {
        Commands::Run { host, port } => server::run_server(&config, host, port).await,
        Commands::Check => {
            info!(config = %cli.config.display(), "Configuration OK");
            Ok(())
        }
    }
}
