//! Wiki Service
//!
//! Entry points for collaborators (CLI, HTTP handlers). Key fields arrive as
//! plain strings and are validated here before any storage access.

use tracing::info;

use super::cache::{CacheConfig, WikiCache};
use super::cache_key::CacheKey;
use super::export::{ExportDocument, ExportFormat, WikiExporter};
use super::registry::{ProjectEntry, ProjectRegistry};
use crate::config::Config;
use crate::types::{Result, WikiCacheRecord, WikiCacheRequest, WikiPage};

#[derive(Debug, Clone)]
pub struct WikiService {
    cache: WikiCache,
}

impl WikiService {
    pub fn new(cache: WikiCache) -> Self {
        Self { cache }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(WikiCache::new(CacheConfig::from(config)))
    }

    pub fn cache(&self) -> &WikiCache {
        &self.cache
    }

    pub fn get(
        &self,
        owner: &str,
        repo: &str,
        repo_type: &str,
        language: &str,
    ) -> Result<Option<WikiCacheRecord>> {
        let key = CacheKey::new(owner, repo, repo_type, language);
        info!("Retrieving wiki cache for {}", key);
        self.cache.get(&key)
    }

    pub fn put(
        &self,
        owner: &str,
        repo: &str,
        repo_type: &str,
        language: &str,
        record: &WikiCacheRecord,
    ) -> Result<()> {
        let key = CacheKey::new(owner, repo, repo_type, language);
        self.cache.put(&key, record)
    }

    /// Store a request that carries its key fields inline
    pub fn put_request(&self, request: WikiCacheRequest) -> Result<CacheKey> {
        let (key, record) = request.into_parts();
        self.cache.put(&key, &record)?;
        Ok(key)
    }

    /// Fails with [`crate::WikiError::NotFound`] when no record exists
    pub fn delete(&self, owner: &str, repo: &str, repo_type: &str, language: &str) -> Result<()> {
        let key = CacheKey::new(owner, repo, repo_type, language);
        info!("Deleting wiki cache for {}", key);
        self.cache.delete(&key)
    }

    pub fn list_projects(&self) -> Vec<ProjectEntry> {
        ProjectRegistry::new(&self.cache).list_projects()
    }

    pub fn export(
        &self,
        repo_identifier: &str,
        pages: &[WikiPage],
        format: ExportFormat,
    ) -> Result<ExportDocument> {
        WikiExporter::new(repo_identifier).export(pages, format)
    }
}
