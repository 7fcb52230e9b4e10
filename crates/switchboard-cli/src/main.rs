//! CLI entry point - the composition root.
//!
//! Parses arguments, initializes logging, and dispatches to handlers. No
//! subcommand behaves like `serve` with no overrides, so a bare
//! `switchboard` starts the gateway.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use switchboard_cli::{Cli, Commands, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before the filter reads RUST_LOG
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
        static_dir: None,
    });

    match command {
        Commands::Serve {
            host,
            port,
            static_dir,
        } => handlers::serve::execute(&cli.config, host, port, static_dir).await,
        Commands::Models => handlers::models::execute(&cli.config).await,
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
