//! Wiki Cache & Project Registry
//!
//! ```text
//! CacheKey ──encode──▶ file name ──▶ WikiCache (get / put / delete)
//!                                          │
//!                                      list_all
//!                                          ▼
//!                    ProjectRegistry ◀──decode── stored names
//!
//! WikiStructure.pages ──▶ WikiExporter ──▶ Markdown | JSON
//! ```

pub mod cache;
pub mod cache_key;
pub mod export;
pub mod registry;
pub mod service;

pub use cache::{CacheConfig, CacheEntries, StoredEntry, WikiCache};
pub use cache_key::CacheKey;
pub use export::{ExportDocument, ExportFormat, ExportMetadata, JsonExport, WikiExporter};
pub use registry::{ProjectEntry, ProjectRegistry};
pub use service::WikiService;
