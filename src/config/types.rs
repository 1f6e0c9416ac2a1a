//! Configuration Types
//!
//! All configuration structures with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::loader::ConfigLoader;
use crate::constants::cache::DIR_NAME;
use crate::types::{Result, WikiError};
use crate::wiki::ExportFormat;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Cache storage settings
    pub cache: CacheSettings,

    /// Export defaults
    pub export: ExportSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            cache: CacheSettings::default(),
            export: ExportSettings::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    /// Returns `WikiError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.cache.root.as_os_str().is_empty() {
            return Err(WikiError::Config(
                "cache.root must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Cache Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Directory holding per-owner/per-repo cache files
    pub root: PathBuf,
}

impl Default for CacheSettings {
    fn default() -> Self {
        let root = ConfigLoader::global_cache_dir()
            .unwrap_or_else(ConfigLoader::project_dir)
            .join(DIR_NAME);
        Self { root }
    }
}

// =============================================================================
// Export Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Format used when a command does not name one
    pub format: ExportFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.export.format, ExportFormat::Markdown);
        assert!(config.cache.root.ends_with(DIR_NAME));
        config.validate().unwrap();
    }

    #[test]
    fn test_empty_root_rejected() {
        let mut config = Config::default();
        config.cache.root = PathBuf::new();
        assert!(matches!(config.validate(), Err(WikiError::Config(_))));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[export]\nformat = \"json\"\n").unwrap();
        assert_eq!(config.export.format, ExportFormat::Json);
        assert_eq!(config.cache, CacheSettings::default());
    }
}
