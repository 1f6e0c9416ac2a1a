//! wikivault - Wiki Cache & Project Registry
//!
//! Persists generated repository wikis so generation is not repeated, lists
//! the projects present in the cache, and exports cached wikis as Markdown
//! or JSON documents.
//!
//! ## Quick Start
//!
//! ```no_run
//! use wikivault::{CacheConfig, ExportFormat, WikiCache, WikiService};
//!
//! # fn main() -> wikivault::Result<()> {
//! let service = WikiService::new(WikiCache::new(CacheConfig::new("/var/cache/wikis")));
//!
//! if let Some(record) = service.get("acme", "widgets", "github", "en")? {
//!     let doc = service.export(
//!         "https://github.com/acme/widgets",
//!         &record.wiki_structure.pages,
//!         ExportFormat::Markdown,
//!     )?;
//!     println!("{}", doc.filename);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`wiki`]: Cache key codec, cache store, project registry, export
//! - [`types`]: Wiki content types and the error type
//! - [`config`]: Layered configuration (defaults, files, environment)
//! - [`cli`]: Command handlers for the `wikivault` binary

pub mod cli;
pub mod config;
pub mod constants;
pub mod types;
pub mod wiki;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{ErrorCategory, Result, WikiError};

// Content
pub use types::{Importance, WikiCacheRecord, WikiCacheRequest, WikiPage, WikiStructure};

// Cache, registry, export
pub use wiki::{
    CacheConfig, CacheKey, ExportDocument, ExportFormat, ProjectEntry, ProjectRegistry,
    WikiCache, WikiExporter, WikiService,
};
