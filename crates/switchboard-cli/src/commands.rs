//! Main commands enum and subcommands.

use std::path::PathBuf;

use clap::Subcommand;

/// Available commands for the switchboard gateway.
#[derive(Subcommand)]
pub enum Commands {
    /// Start the gateway HTTP server
    Serve {
        /// Host to bind, overriding the configuration file
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overriding the configuration file
        #[arg(short, long)]
        port: Option<u16>,

        /// Serve static files from this directory alongside the API
        #[arg(long = "static-dir")]
        static_dir: Option<PathBuf>,
    },

    /// List the models reachable through configured backends
    Models,
}
