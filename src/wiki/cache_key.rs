//! Cache key codec
//!
//! Maps the four-part wiki identity to a single file name and back:
//!
//! ```text
//! wiki_cache~<repo_type>~<owner>~<repo>~<language>.json
//! ```
//!
//! The separator is reserved. Fields containing it are rejected at encode
//! time, which makes decoding an exact split instead of a guess. Owner and
//! repo also become directory names, so path-like values are rejected too.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::cache::{FILE_PREFIX, FILE_SUFFIX, SEPARATOR};
use crate::types::{Result, WikiError};

/// Identity of one cache record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub owner: String,
    pub repo: String,
    pub repo_type: String,
    pub language: String,
}

impl CacheKey {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        repo_type: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            repo_type: repo_type.into(),
            language: language.into(),
        }
    }

    /// Fields in encoding order, paired with their names for error reporting
    fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("repo_type", &self.repo_type),
            ("owner", &self.owner),
            ("repo", &self.repo),
            ("language", &self.language),
        ]
    }

    /// Check every field without touching storage
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.fields() {
            validate_field(name, value)?;
        }
        Ok(())
    }

    /// Storage file name for this key
    pub fn encode(&self) -> Result<String> {
        self.validate()?;

        let sep = SEPARATOR;
        Ok(format!(
            "{FILE_PREFIX}{sep}{}{sep}{}{sep}{}{sep}{}{FILE_SUFFIX}",
            self.repo_type, self.owner, self.repo, self.language
        ))
    }

    /// Recover a key from a name produced by [`CacheKey::encode`]
    pub fn decode(name: &str) -> Result<Self> {
        let body = name
            .strip_prefix(FILE_PREFIX)
            .and_then(|rest| rest.strip_prefix(SEPARATOR))
            .and_then(|rest| rest.strip_suffix(FILE_SUFFIX))
            .ok_or_else(|| WikiError::decode(name, "not a wiki cache file name"))?;

        let parts: Vec<&str> = body.split(SEPARATOR).collect();
        let [repo_type, owner, repo, language] = parts.as_slice() else {
            return Err(WikiError::decode(
                name,
                format!("expected 4 key fields, found {}", parts.len()),
            ));
        };

        let key = Self::new(*owner, *repo, *repo_type, *language);
        key.validate()
            .map_err(|e| WikiError::decode(name, e.to_string()))?;
        Ok(key)
    }

    /// Does this look like a cache file name (prefix and suffix only)
    pub fn is_cache_file_name(name: &str) -> bool {
        name.strip_prefix(FILE_PREFIX)
            .is_some_and(|rest| rest.starts_with(SEPARATOR))
            && name.ends_with(FILE_SUFFIX)
    }

    /// Registry id: `repo_type_owner_repo`
    pub fn project_id(&self) -> String {
        format!("{}_{}_{}", self.repo_type, self.owner, self.repo)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ({}), lang: {}",
            self.owner, self.repo, self.repo_type, self.language
        )
    }
}

fn validate_field(field: &'static str, value: &str) -> Result<()> {
    let reason = if value.is_empty() {
        "must not be empty".to_string()
    } else if value.contains(SEPARATOR) {
        format!("contains reserved separator '{}'", SEPARATOR)
    } else if value == "." || value == ".." {
        "must not be a relative path component".to_string()
    } else if value.contains(['/', '\\', '\0']) {
        "contains a path separator or NUL".to_string()
    } else {
        return Ok(());
    };

    Err(WikiError::invalid_key_field(field, value, reason))
}
