//! CLI definitions for Flowgate.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Flowgate CLI.
#[derive(Debug, Parser)]
#[command(name = "flowgate")]
#[command(about = "HTTP gateway for starting and polling Gumloop flows")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (optional; defaults apply when missing)
    #[arg(
        short,
        long,
        env = "FLOWGATE_CONFIG",
        default_value = "config/flowgate.toml",
        global = true
    )]
    pub config: PathBuf,

    /// Also write daily-rotated log files to this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Run the gateway in foreground (default)
    Run {
        /// Server host (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Load and validate configuration, then exit
    Check,
}
