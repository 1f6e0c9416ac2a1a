//! Global Constants
//!
//! Centralized constants for the on-disk format and export output.

/// Cache file naming
pub mod cache {
    /// Leading token of every cache file name
    pub const FILE_PREFIX: &str = "wiki_cache";

    /// Reserved separator between key fields; rejected inside any field
    pub const SEPARATOR: char = '~';

    /// Trailing extension of every cache file name
    pub const FILE_SUFFIX: &str = ".json";

    /// Unix mode of stored record files (owner rw, everyone else r)
    pub const RECORD_FILE_MODE: u32 = 0o644;

    /// Cache subdirectory under the base cache directory
    pub const DIR_NAME: &str = "wikicache";
}

/// Export rendering
pub mod export {
    /// Timestamp printed in the markdown header
    pub const MARKDOWN_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

    /// Timestamp embedded in suggested file names
    pub const FILENAME_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

    /// File name stem used when the repository identifier has no usable segment
    pub const FALLBACK_NAME: &str = "wiki";
}
