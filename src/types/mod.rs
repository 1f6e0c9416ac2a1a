pub mod error;
pub mod wiki;

pub use error::{ErrorCategory, Result, WikiError};
pub use wiki::{Importance, WikiCacheRecord, WikiCacheRequest, WikiPage, WikiStructure};
