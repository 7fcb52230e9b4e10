//! Models command handler.
//!
//! Prints the model ids reachable through the configured backends.

use std::path::Path;

use anyhow::{Context, Result};

use switchboard_core::{BackendRegistry, GatewayConfig};
use switchboard_gateway::upstream;

/// Execute the models command.
///
/// Queries every configured backend for its served models and prints the
/// aggregate list. Backends that are down are skipped; if none respond,
/// the configured keys are listed instead so routing targets stay visible.
pub async fn execute(config_path: &Path) -> Result<()> {
    let config = GatewayConfig::load(config_path)?;
    let registry = BackendRegistry::from_config(&config)?;

    let client = upstream::build_client().context("failed to build HTTP client")?;
    let models = upstream::discover_models(&client, &registry).await;

    let default = registry.default_entry();
    println!("Available models:");
    for model in &models {
        if *model == default.key || *model == default.descriptor.model_id {
            println!("  {model} (default)");
        } else {
            println!("  {model}");
        }
    }

    Ok(())
}
