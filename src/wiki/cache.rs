//! Wiki Cache Store
//!
//! File-backed persistence for generated wiki records, one JSON file per
//! [`CacheKey`]:
//!
//! ```text
//! <cache_dir>/<owner>/<repo>/wiki_cache~<repo_type>~<owner>~<repo>~<language>.json
//! ```
//!
//! ## Write Discipline
//!
//! Records are written to a named temporary file in the destination
//! directory, flushed, then renamed over the target. Readers observe either
//! the previous record or the new one in full. Concurrent writers to the same
//! key race; the last rename wins. The temporary file is removed on every
//! failure path when it goes out of scope.

use std::fs::{self, ReadDir};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use super::cache_key::CacheKey;
use crate::config::Config;
use crate::types::{Result, WikiCacheRecord, WikiError};

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Cache root directory
    pub cache_dir: PathBuf,
}

impl CacheConfig {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }
}

impl From<&Config> for CacheConfig {
    fn from(config: &Config) -> Self {
        Self::new(config.cache.root.clone())
    }
}

/// A cache file found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    /// File name (the encoded key)
    pub name: String,
    /// Full path to the file
    pub path: PathBuf,
    /// Creation time, or modification time where the filesystem has none
    pub created_at: DateTime<Utc>,
}

/// Wiki cache manager
#[derive(Debug, Clone)]
pub struct WikiCache {
    config: CacheConfig,
}

impl WikiCache {
    pub fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    pub fn root(&self) -> &Path {
        &self.config.cache_dir
    }

    /// Directory holding every record of one owner/repo pair
    fn record_dir(&self, key: &CacheKey) -> PathBuf {
        self.config.cache_dir.join(&key.owner).join(&key.repo)
    }

    /// Full path of the record file for a key. Validates the key.
    pub fn record_path(&self, key: &CacheKey) -> Result<PathBuf> {
        let name = key.encode()?;
        Ok(self.record_dir(key).join(name))
    }

    /// Load a cached record; `None` when nothing is stored under the key
    pub fn get(&self, key: &CacheKey) -> Result<Option<WikiCacheRecord>> {
        let path = self.record_path(key)?;

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Wiki cache not found for {}", key);
                return Ok(None);
            }
            Err(e) => return Err(storage_error(&path, e)),
        };

        let record: WikiCacheRecord = serde_json::from_str(&content)
            .map_err(|e| WikiError::decode(path.display().to_string(), e.to_string()))?;

        debug!(
            "Loaded wiki cache for {} ({} pages)",
            key,
            record.wiki_structure.pages.len()
        );
        Ok(Some(record))
    }

    /// Store a record, replacing any existing record for the key
    pub fn put(&self, key: &CacheKey, record: &WikiCacheRecord) -> Result<()> {
        let path = self.record_path(key)?;
        let dir = self.record_dir(key);

        let orphans = record.orphaned_pages();
        if !orphans.is_empty() {
            warn!(
                "Wiki cache for {} has {} generated pages missing from its structure: {}",
                key,
                orphans.len(),
                orphans.join(", ")
            );
        }

        let content = serde_json::to_string_pretty(record)?;

        fs::create_dir_all(&dir).map_err(|e| storage_error(&dir, e))?;

        let mut temp = NamedTempFile::new_in(&dir).map_err(|e| storage_error(&dir, e))?;
        set_record_permissions(&temp).map_err(|e| storage_error(temp.path(), e))?;
        temp.write_all(content.as_bytes())
            .map_err(|e| storage_error(temp.path(), e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| storage_error(temp.path(), e))?;
        temp.persist(&path)
            .map_err(|e| storage_error(&path, e.error))?;

        info!(
            "Saved wiki cache for {} ({} pages, {} bytes) to {}",
            key,
            record.wiki_structure.pages.len(),
            content.len(),
            path.display()
        );
        Ok(())
    }

    /// Remove the record for a key
    pub fn delete(&self, key: &CacheKey) -> Result<()> {
        let path = self.record_path(key)?;

        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Deleted wiki cache for {}", key);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Wiki cache not found, nothing to delete: {}", path.display());
                Err(WikiError::NotFound(key.to_string()))
            }
            Err(e) => Err(storage_error(&path, e)),
        }
    }

    /// Walk the cache root for files named like cache records.
    ///
    /// Every call starts a fresh walk. A missing root yields nothing.
    pub fn list_all(&self) -> CacheEntries {
        CacheEntries {
            pending: vec![self.config.cache_dir.clone()],
            current: None,
        }
    }
}

/// Lazy depth-first walk over the cache root
pub struct CacheEntries {
    pending: Vec<PathBuf>,
    current: Option<(PathBuf, ReadDir)>,
}

impl Iterator for CacheEntries {
    type Item = Result<StoredEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current.is_none() {
                let dir = self.pending.pop()?;
                match fs::read_dir(&dir) {
                    Ok(entries) => self.current = Some((dir, entries)),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Some(Err(storage_error(&dir, e))),
                }
                continue;
            }

            let (dir, entries) = self.current.as_mut()?;
            let entry = match entries.next() {
                Some(Ok(entry)) => entry,
                Some(Err(e)) => return Some(Err(storage_error(dir, e))),
                None => {
                    self.current = None;
                    continue;
                }
            };

            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => return Some(Err(storage_error(&path, e))),
            };

            if file_type.is_dir() {
                self.pending.push(path);
                continue;
            }

            // Broken symlinks and other non-regular entries are dropped
            if !file_type.is_file() {
                continue;
            }

            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !CacheKey::is_cache_file_name(&name) {
                continue;
            }

            return Some(stored_entry(name, path));
        }
    }
}

fn stored_entry(name: String, path: PathBuf) -> Result<StoredEntry> {
    let metadata = fs::metadata(&path).map_err(|e| storage_error(&path, e))?;
    let created = metadata
        .created()
        .or_else(|_| metadata.modified())
        .map_err(|e| storage_error(&path, e))?;

    Ok(StoredEntry {
        name,
        path,
        created_at: DateTime::<Utc>::from(created),
    })
}

/// Temp files are created 0600; stored records get [`RECORD_FILE_MODE`]
///
/// [`RECORD_FILE_MODE`]: crate::constants::cache::RECORD_FILE_MODE
#[cfg(unix)]
fn set_record_permissions(temp: &NamedTempFile) -> io::Result<()> {
    use crate::constants::cache::RECORD_FILE_MODE;
    use std::os::unix::fs::PermissionsExt;

    temp.as_file()
        .set_permissions(fs::Permissions::from_mode(RECORD_FILE_MODE))
}

#[cfg(not(unix))]
fn set_record_permissions(_temp: &NamedTempFile) -> io::Result<()> {
    Ok(())
}

/// Log an I/O failure with its path and wrap it
fn storage_error(path: &Path, source: io::Error) -> WikiError {
    error!("Wiki cache I/O failure at {}: {}", path.display(), source);
    WikiError::io(path, source)
}
