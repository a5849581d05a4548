//! CLI argument definitions using clap
//!
//! Commands:
//! - mufoods serve [--host <host>] [--port <port>] [--memory]
//! - mufoods seed [--memory]
//! - mufoods diagnose [--memory]

use clap::{Args, Parser, Subcommand};

use crate::observability::LogFormat;

/// MU Foods catalog and contact-form backend
#[derive(Parser, Debug)]
#[command(name = "mufoods")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log output format (json or text)
    #[arg(long, global = true, env = "LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Store selection shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Use the in-memory store instead of MongoDB
    #[arg(long)]
    pub memory: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Host to bind to (overrides HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides PORT)
        #[arg(long)]
        port: Option<u16>,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Insert the demo beverages into an empty catalog and exit
    Seed {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Print the connectivity diagnostics report and exit
    Diagnose {
        #[command(flatten)]
        store: StoreArgs,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
