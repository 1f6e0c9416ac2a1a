//! Config Command
//!
//! Usage:
//!   wikivault config show [-f json|toml]
//!   wikivault config path
//!   wikivault config init [-g] [--force]

use crate::cli::CommandContext;
use crate::cli::ui::Output;
use crate::config::ConfigLoader;
use crate::types::Result;

/// Show the merged effective configuration
pub fn show(ctx: &CommandContext, format: &str) -> Result<()> {
    println!("{}", ConfigLoader::render(&ctx.config, format == "json")?);
    Ok(())
}

/// Show configuration paths
pub fn path(ctx: &CommandContext) -> Result<()> {
    ConfigLoader::show_path(&ctx.config);
    Ok(())
}

/// Write a default config file
pub fn init(global: bool, force: bool) -> Result<()> {
    let path = if global {
        ConfigLoader::init_global(force)?
    } else {
        ConfigLoader::init_project(force)?
    };

    Output::new().success(&format!("Configuration ready: {}", path.display()));
    Ok(())
}
