//! Configuration Management
//!
//! Hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/wikivault/config.toml)
//! 3. Project config (.wikivault/config.toml)
//! 4. Environment variables (WIKIVAULT_*)
//! 5. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
