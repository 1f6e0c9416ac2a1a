//! Export Command
//!
//! Export a wiki as Markdown or JSON, either from the cache or from a page
//! list file.

use std::fs;
use std::path::PathBuf;

use crate::cli::CommandContext;
use crate::cli::ui::Output;
use crate::cli::util::read_json_file;
use crate::types::{Result, WikiError, WikiPage};
use crate::wiki::{CacheKey, ExportFormat};

/// Where the pages come from
#[derive(Debug, Clone)]
pub enum ExportSource {
    /// Pages of a cached structure, in structure order
    Cache(CacheKey),
    /// JSON array of pages
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub source: ExportSource,
    /// Repository identifier for the document header; required for file input
    pub repo_url: Option<String>,
    /// Falls back to `export.format` from config
    pub format: Option<ExportFormat>,
    /// Directory to write into; stdout when absent
    pub output: Option<PathBuf>,
}

pub fn run(ctx: &CommandContext, options: ExportOptions) -> Result<()> {
    let (repository, pages) = load_pages(ctx, &options)?;
    let format = options.format.unwrap_or(ctx.config.export.format);

    let document = ctx.service.export(&repository, &pages, format)?;

    match options.output {
        Some(dir) => {
            fs::create_dir_all(&dir).map_err(|e| WikiError::io(&dir, e))?;
            let path = dir.join(&document.filename);
            fs::write(&path, document.as_bytes()).map_err(|e| WikiError::io(&path, e))?;
            Output::new().success(&format!(
                "Exported {} pages ({}) to {}",
                pages.len(),
                document.media_type,
                path.display()
            ));
        }
        None => print!("{}", document.content),
    }

    Ok(())
}

fn load_pages(ctx: &CommandContext, options: &ExportOptions) -> Result<(String, Vec<WikiPage>)> {
    match &options.source {
        ExportSource::Cache(key) => {
            let record = ctx
                .service
                .get(&key.owner, &key.repo, &key.repo_type, &key.language)?
                .ok_or_else(|| WikiError::NotFound(key.to_string()))?;

            let repository = options
                .repo_url
                .clone()
                .unwrap_or_else(|| format!("{}/{}", key.owner, key.repo));
            Ok((repository, record.wiki_structure.pages))
        }
        ExportSource::File(path) => {
            let repository = options.repo_url.clone().ok_or_else(|| {
                WikiError::Config("--repo-url is required when exporting from a file".to_string())
            })?;
            let pages: Vec<WikiPage> = read_json_file(path)?;
            Ok((repository, pages))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::types::{WikiCacheRecord, WikiStructure};
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> CommandContext {
        let mut config = Config::default();
        config.cache.root = dir.path().join("cache");
        CommandContext::from_config(config)
    }

    fn pages() -> Vec<WikiPage> {
        vec![
            WikiPage::new("intro", "Introduction").with_content("Hello"),
            WikiPage::new("usage", "Usage").with_related(["intro"]),
        ]
    }

    #[test]
    fn test_export_from_cache_to_dir() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let key = CacheKey::new("acme", "widgets", "github", "en");
        ctx.service
            .cache()
            .put(
                &key,
                &WikiCacheRecord::new(WikiStructure {
                    id: "w".to_string(),
                    title: "Widgets".to_string(),
                    description: String::new(),
                    pages: pages(),
                }),
            )
            .unwrap();

        let out_dir = temp_dir.path().join("out");
        run(
            &ctx,
            ExportOptions {
                source: ExportSource::Cache(key),
                repo_url: None,
                format: Some(ExportFormat::Markdown),
                output: Some(out_dir.clone()),
            },
        )
        .unwrap();

        let written: Vec<_> = fs::read_dir(&out_dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(written.len(), 1);
        let name = written[0].file_name().unwrap().to_str().unwrap().to_string();
        assert!(name.starts_with("widgets_wiki_") && name.ends_with(".md"));

        let content = fs::read_to_string(&written[0]).unwrap();
        assert!(content.starts_with("# Wiki Documentation for acme/widgets\n"));
    }

    #[test]
    fn test_export_missing_cache_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);

        let err = run(
            &ctx,
            ExportOptions {
                source: ExportSource::Cache(CacheKey::new("acme", "widgets", "github", "en")),
                repo_url: None,
                format: None,
                output: Some(temp_dir.path().join("out")),
            },
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_export_from_file_requires_repo_url() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let pages_file = temp_dir.path().join("pages.json");
        fs::write(&pages_file, serde_json::to_string(&pages()).unwrap()).unwrap();

        let err = run(
            &ctx,
            ExportOptions {
                source: ExportSource::File(pages_file.clone()),
                repo_url: None,
                format: Some(ExportFormat::Json),
                output: Some(temp_dir.path().join("out")),
            },
        )
        .unwrap_err();
        assert!(matches!(err, WikiError::Config(_)));

        run(
            &ctx,
            ExportOptions {
                source: ExportSource::File(pages_file),
                repo_url: Some("https://github.com/acme/widgets".to_string()),
                format: Some(ExportFormat::Json),
                output: Some(temp_dir.path().join("out")),
            },
        )
        .unwrap();
        let written = fs::read_dir(temp_dir.path().join("out"))
            .unwrap()
            .next()
            .unwrap()
            .unwrap()
            .path();
        assert_eq!(written.extension().unwrap(), "json");
    }
}
