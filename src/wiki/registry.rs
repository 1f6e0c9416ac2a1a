//! Project Registry
//!
//! Derives the list of processed projects from cache file names alone. No
//! record bodies are read; a project exists exactly as long as its cache
//! file does.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::cache::{StoredEntry, WikiCache};
use super::cache_key::CacheKey;

/// One cached project, as shown in project listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    /// `repo_type_owner_repo`
    pub id: String,
    pub owner: String,
    pub repo: String,
    /// `owner/repo`
    pub name: String,
    pub repo_type: String,
    pub language: String,
    pub cached_at: DateTime<Utc>,
    /// `cached_at` in Unix milliseconds
    #[serde(rename = "submittedAt")]
    pub submitted_at: i64,
}

impl ProjectEntry {
    pub fn from_key(key: CacheKey, cached_at: DateTime<Utc>) -> Self {
        Self {
            id: key.project_id(),
            name: format!("{}/{}", key.owner, key.repo),
            submitted_at: cached_at.timestamp_millis(),
            owner: key.owner,
            repo: key.repo,
            repo_type: key.repo_type,
            language: key.language,
            cached_at,
        }
    }

    /// Key of the record this entry was derived from
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(&self.owner, &self.repo, &self.repo_type, &self.language)
    }
}

pub struct ProjectRegistry<'a> {
    cache: &'a WikiCache,
}

impl<'a> ProjectRegistry<'a> {
    pub fn new(cache: &'a WikiCache) -> Self {
        Self { cache }
    }

    /// All decodable cache records, most recently cached first.
    ///
    /// Entries that fail to stat or decode are logged and skipped.
    pub fn list_projects(&self) -> Vec<ProjectEntry> {
        let mut projects: Vec<ProjectEntry> = self
            .cache
            .list_all()
            .filter_map(|entry| match entry {
                Ok(entry) => decode_entry(self.cache, entry),
                Err(e) => {
                    warn!("Skipping unreadable cache entry: {}", e);
                    None
                }
            })
            .collect();

        // Stable: equal timestamps keep enumeration order
        projects.sort_by(|a, b| b.cached_at.cmp(&a.cached_at));

        info!(
            "Found {} processed project entries in {}",
            projects.len(),
            self.cache.root().display()
        );
        projects
    }
}

/// Decode a stored entry, keeping it only if its key addresses that exact file
fn decode_entry(cache: &WikiCache, entry: StoredEntry) -> Option<ProjectEntry> {
    let key = match CacheKey::decode(&entry.name) {
        Ok(key) => key,
        Err(e) => {
            warn!(
                "Error parsing cache filename {}: {}",
                entry.path.display(),
                e
            );
            return None;
        }
    };

    match cache.record_path(&key) {
        Ok(expected) if expected == entry.path => {
            Some(ProjectEntry::from_key(key, entry.created_at))
        }
        Ok(expected) => {
            warn!(
                "Skipping misplaced cache file {} (expected at {})",
                entry.path.display(),
                expected.display()
            );
            None
        }
        Err(e) => {
            warn!("Skipping cache file {}: {}", entry.path.display(), e);
            None
        }
    }
}
