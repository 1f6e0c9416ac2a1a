//! CLI Common Utilities
//!
//! Shared context and argument types for command handlers.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use serde::de::DeserializeOwned;

use crate::config::{Config, ConfigLoader};
use crate::types::{Result, WikiError};
use crate::wiki::{CacheKey, WikiService};

/// Cache key flags shared by get, put, delete and export
#[derive(Debug, Clone, Args)]
pub struct KeyArgs {
    #[arg(long, help = "Repository owner")]
    pub owner: String,

    #[arg(long, help = "Repository name")]
    pub repo: String,

    #[arg(
        long = "type",
        default_value = "github",
        help = "Repository type (github, gitlab, bitbucket, local)"
    )]
    pub repo_type: String,

    #[arg(long, default_value = "en", help = "Wiki language code")]
    pub language: String,
}

impl KeyArgs {
    pub fn to_key(&self) -> CacheKey {
        CacheKey::new(&self.owner, &self.repo, &self.repo_type, &self.language)
    }
}

/// Command execution context
///
/// Resolved once per invocation: configuration plus the service bound to the
/// configured cache root.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: Config,
    pub service: WikiService,
}

impl CommandContext {
    /// Load configuration, apply CLI overrides, and open the cache
    pub fn load(config_path: Option<&Path>, cache_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = ConfigLoader::load_with(config_path)?;
        if let Some(dir) = cache_dir {
            config.cache.root = dir;
            config.validate()?;
        }

        Ok(Self::from_config(config))
    }

    pub fn from_config(config: Config) -> Self {
        let service = WikiService::from_config(&config);
        Self { config, service }
    }
}

/// Read and parse a JSON input file
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| WikiError::io(path, e))?;
    serde_json::from_str(&content)
        .map_err(|e| WikiError::decode(path.display().to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WikiPage;
    use tempfile::TempDir;

    #[test]
    fn test_key_args_to_key() {
        let args = KeyArgs {
            owner: "acme".to_string(),
            repo: "widgets".to_string(),
            repo_type: "github".to_string(),
            language: "en".to_string(),
        };
        assert_eq!(args.to_key(), CacheKey::new("acme", "widgets", "github", "en"));
    }

    #[test]
    fn test_context_uses_configured_root() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.cache.root = temp_dir.path().to_path_buf();

        let context = CommandContext::from_config(config);
        assert_eq!(context.service.cache().root(), temp_dir.path());
    }

    #[test]
    fn test_read_json_file_errors() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.json");
        assert!(matches!(
            read_json_file::<Vec<WikiPage>>(&missing),
            Err(WikiError::Io { .. })
        ));

        let broken = temp_dir.path().join("broken.json");
        fs::write(&broken, "[{").unwrap();
        assert!(matches!(
            read_json_file::<Vec<WikiPage>>(&broken),
            Err(WikiError::Decode { .. })
        ));
    }
}
