//! Unified Error Type System
//!
//! Centralized error type for the cache, registry and export layers.
//!
//! ## Error Categories
//!
//! - **InvalidInput**: A key field was rejected before any I/O happened
//! - **NotFound**: No record at the requested key (a normal outcome)
//! - **Storage**: The filesystem refused a read, write, rename or delete
//! - **Corrupt**: A stored name or record body could not be decoded
//! - **Config**: Configuration could not be loaded or failed validation
//!
//! Collaborators (CLI, HTTP layer) route on [`WikiError::category`] instead of
//! matching variants directly.

use std::path::{Path, PathBuf};

use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Coarse error classification for response mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller supplied an unusable value
    InvalidInput,
    /// Requested record does not exist
    NotFound,
    /// Underlying storage failed
    Storage,
    /// Stored data could not be parsed
    Corrupt,
    /// Configuration problem
    Config,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "INVALID_INPUT"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Corrupt => write!(f, "CORRUPT"),
            Self::Config => write!(f, "CONFIG"),
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum WikiError {
    // -------------------------------------------------------------------------
    // Key Errors
    // -------------------------------------------------------------------------
    /// A cache key component cannot be encoded into a storage name
    #[error("Invalid cache key field '{field}' ({value:?}): {reason}")]
    InvalidKeyField {
        field: &'static str,
        value: String,
        reason: String,
    },

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("Wiki cache not found: {0}")]
    NotFound(String),

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {target}: {message}")]
    Decode { target: String, message: String },

    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, WikiError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl WikiError {
    /// Create an I/O error bound to the path it happened on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a decode error for a named target (file name, record path)
    pub fn decode(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create an invalid key field error
    pub fn invalid_key_field(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidKeyField {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Classify this error for routing
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidKeyField { .. } => ErrorCategory::InvalidInput,
            Self::NotFound(_) => ErrorCategory::NotFound,
            Self::Io { .. } => ErrorCategory::Storage,
            Self::Decode { .. } | Self::Json(_) => ErrorCategory::Corrupt,
            Self::Config(_) => ErrorCategory::Config,
        }
    }

    /// Absent record, as opposed to a storage fault
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::InvalidInput.to_string(), "INVALID_INPUT");
        assert_eq!(ErrorCategory::NotFound.to_string(), "NOT_FOUND");
        assert_eq!(ErrorCategory::Corrupt.to_string(), "CORRUPT");
    }

    #[test]
    fn test_error_categories() {
        let err = WikiError::invalid_key_field("owner", "a~b", "contains separator");
        assert_eq!(err.category(), ErrorCategory::InvalidInput);

        let err = WikiError::NotFound("acme/widgets".to_string());
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.is_not_found());

        let err = WikiError::io(
            "/tmp/cache",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert!(!err.is_not_found());

        let err = WikiError::decode("wiki_cache~x.json", "bad name");
        assert_eq!(err.category(), ErrorCategory::Corrupt);
    }

    #[test]
    fn test_error_display_includes_path() {
        let err = WikiError::io(
            "/var/cache/wiki.json",
            std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        );
        let message = err.to_string();
        assert!(message.contains("/var/cache/wiki.json"));
        assert!(message.contains("disk full"));
    }

    #[test]
    fn test_invalid_key_field_display() {
        let err = WikiError::invalid_key_field("repo", "a~b", "contains reserved separator '~'");
        assert_eq!(
            err.to_string(),
            "Invalid cache key field 'repo' (\"a~b\"): contains reserved separator '~'"
        );
    }
}
