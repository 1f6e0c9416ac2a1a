//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/wikivault/config.toml)
//! 3. Project config (.wikivault/config.toml), or an explicit file
//! 4. Environment variables (WIKIVAULT_* prefix)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{Result, WikiError};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        Self::load_with(None)
    }

    /// Same chain, with `explicit` replacing the project config file
    pub fn load_with(explicit: Option<&Path>) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Merge global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        // Merge project (or explicitly requested) config
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(WikiError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                debug!("Loading config from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
            None => {
                let project_path = Self::project_config_path();
                if project_path.exists() {
                    debug!("Loading project config from: {}", project_path.display());
                    figment = figment.merge(Toml::file(&project_path));
                }
            }
        }

        // Environment variables (e.g., WIKIVAULT_CACHE_ROOT -> cache.root)
        figment = figment.merge(Env::prefixed("WIKIVAULT_").split('_').lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| WikiError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        debug!("Wiki cache root: {}", config.cache.root.display());
        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/wikivault/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("wikivault"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to global cache directory (~/.cache/wikivault/)
    pub fn global_cache_dir() -> Option<PathBuf> {
        env::var("XDG_CACHE_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".cache"))
            })
            .map(|p| p.join("wikivault"))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        Self::project_dir().join("config.toml")
    }

    /// Get project data directory
    pub fn project_dir() -> PathBuf {
        PathBuf::from(".wikivault")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path(config: &Config) {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());

        let cache = &config.cache.root;
        let exists = if cache.exists() { "✓" } else { "✗" };
        println!("  Cache:   {} {}", exists, cache.display());
    }

    /// Render configuration as JSON or TOML
    pub fn render(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            toml::to_string_pretty(config).map_err(|e| WikiError::Config(e.to_string()))
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize global configuration
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            WikiError::Config("Cannot determine global config directory".to_string())
        })?;

        fs::create_dir_all(&global_dir).map_err(|e| WikiError::io(&global_dir, e))?;

        let config_path = global_dir.join("config.toml");
        Self::write_template(&config_path, &Self::default_config(), force)?;
        Ok(config_path)
    }

    /// Initialize project configuration
    pub fn init_project(force: bool) -> Result<PathBuf> {
        let project_dir = Self::project_dir();
        fs::create_dir_all(&project_dir).map_err(|e| WikiError::io(&project_dir, e))?;

        let config_path = Self::project_config_path();
        Self::write_template(&config_path, &Self::default_config(), force)?;
        Ok(config_path)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn write_template(path: &Path, content: &str, force: bool) -> Result<()> {
        if path.exists() && !force {
            info!("Config exists: {}", path.display());
            return Ok(());
        }

        fs::write(path, content).map_err(|e| WikiError::io(path, e))?;
        info!("Created config: {}", path.display());
        Ok(())
    }

    /// Generate default config content (TOML)
    fn default_config() -> String {
        r#"# wikivault configuration
# Project settings in .wikivault/config.toml override global ones;
# WIKIVAULT_* environment variables override both.

version = "1.0"

[cache]
# Root directory for cached wikis (default: ~/.cache/wikivault/wikicache)
# root = "/var/lib/wikivault/wikicache"

[export]
# Default export format: "markdown" or "json"
format = "markdown"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wiki::ExportFormat;
    use figment::Jail;

    fn isolate(jail: &mut Jail) {
        let home = jail.directory().to_path_buf();
        jail.set_env("HOME", home.display());
        jail.set_env("XDG_CONFIG_HOME", home.join("config").display());
        jail.set_env("XDG_CACHE_HOME", home.join("cache").display());
    }

    #[test]
    fn test_load_default_config() {
        Jail::expect_with(|jail| {
            isolate(jail);
            let config = ConfigLoader::load().map_err(|e| e.to_string())?;
            assert_eq!(config.version, "1.0");
            assert!(config.cache.root.ends_with("cache/wikivault/wikicache"));
            Ok(())
        });
    }

    #[test]
    fn test_project_config_overrides_default() {
        Jail::expect_with(|jail| {
            isolate(jail);
            fs::create_dir(".wikivault").map_err(|e| e.to_string())?;
            jail.create_file(
                ".wikivault/config.toml",
                "[cache]\nroot = \"/srv/wikis\"\n\n[export]\nformat = \"json\"\n",
            )?;

            let config = ConfigLoader::load().map_err(|e| e.to_string())?;
            assert_eq!(config.cache.root, PathBuf::from("/srv/wikis"));
            assert_eq!(config.export.format, ExportFormat::Json);
            Ok(())
        });
    }

    #[test]
    fn test_env_override() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.set_env("WIKIVAULT_CACHE_ROOT", "/tmp/env-cache");
            jail.set_env("WIKIVAULT_EXPORT_FORMAT", "json");

            let config = ConfigLoader::load().map_err(|e| e.to_string())?;
            assert_eq!(config.cache.root, PathBuf::from("/tmp/env-cache"));
            assert_eq!(config.export.format, ExportFormat::Json);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_must_exist() {
        Jail::expect_with(|jail| {
            isolate(jail);
            let err = ConfigLoader::load_with(Some(Path::new("missing.toml"))).unwrap_err();
            assert!(matches!(err, WikiError::Config(_)));
            Ok(())
        });
    }

    #[test]
    fn test_init_project_writes_loadable_template() {
        Jail::expect_with(|jail| {
            isolate(jail);
            let path = ConfigLoader::init_project(false).map_err(|e| e.to_string())?;
            assert!(path.exists());

            let config = ConfigLoader::load().map_err(|e| e.to_string())?;
            assert_eq!(config.export.format, ExportFormat::Markdown);
            Ok(())
        });
    }

    #[test]
    fn test_render_toml() {
        let rendered = ConfigLoader::render(&Config::default(), false).unwrap();
        assert!(rendered.contains("[cache]"));
        assert!(rendered.contains("format = \"markdown\""));
    }
}
