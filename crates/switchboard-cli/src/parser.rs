//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the switchboard gateway.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands. Running without a subcommand starts the server.
#[derive(Parser)]
#[command(name = "switchboard")]
#[command(about = "Route chat completions across OpenAI-compatible backends")]
#[command(version)]
pub struct Cli {
    /// Path to the gateway configuration file
    #[arg(
        long = "config",
        global = true,
        env = "SWITCHBOARD_CONFIG",
        default_value = "switchboard.json"
    )]
    pub config: PathBuf,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_args_parse() {
        let cli = Cli::parse_from(["switchboard", "--verbose", "--config", "/tmp/gw.json", "models"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("/tmp/gw.json"));
        assert!(matches!(cli.command, Some(Commands::Models)));
    }

    #[test]
    fn bare_invocation_has_no_command() {
        let cli = Cli::parse_from(["switchboard"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::parse_from([
            "switchboard",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8200",
        ]);
        match cli.command {
            Some(Commands::Serve { host, port, static_dir }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8200));
                assert!(static_dir.is_none());
            }
            _ => panic!("expected serve command"),
        }
    }
}
