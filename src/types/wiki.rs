//! Wiki content types
//!
//! Pages, structures and the persisted cache record. Field names on the wire
//! follow the generator's JSON (`filePaths`, `relatedPages`), so cache files
//! and export documents stay readable by the frontend that produced them.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::wiki::CacheKey;

/// Page importance as assigned by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    #[default]
    Medium,
    Low,
}

impl Importance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Importance::High => "high",
            Importance::Medium => "medium",
            Importance::Low => "low",
        }
    }
}

impl std::fmt::Display for Importance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Importance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Importance::High),
            "medium" => Ok(Importance::Medium),
            "low" => Ok(Importance::Low),
            _ => Err(format!(
                "Unknown importance: {}. Valid values: high, medium, low",
                s
            )),
        }
    }
}

/// A single documentation page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiPage {
    pub id: String,
    pub title: String,
    /// Rendered page body (markdown), stored verbatim
    pub content: String,
    /// Source files backing this page, in generator order
    pub file_paths: Vec<String>,
    pub importance: Importance,
    /// Ids of related pages; may name pages outside the current structure
    pub related_pages: Vec<String>,
}

impl WikiPage {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: String::new(),
            file_paths: Vec::new(),
            importance: Importance::default(),
            related_pages: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_importance(mut self, importance: Importance) -> Self {
        self.importance = importance;
        self
    }

    pub fn with_file_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_related<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related_pages = ids.into_iter().map(Into::into).collect();
        self
    }
}

/// Ordered wiki outline; page order drives the exported table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiStructure {
    pub id: String,
    pub title: String,
    pub description: String,
    pub pages: Vec<WikiPage>,
}

impl WikiStructure {
    pub fn page(&self, id: &str) -> Option<&WikiPage> {
        self.pages.iter().find(|p| p.id == id)
    }
}

/// Persisted unit: one file per cache key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiCacheRecord {
    pub wiki_structure: WikiStructure,
    /// Generated pages by id. May diverge from `wiki_structure.pages`.
    pub generated_pages: BTreeMap<String, WikiPage>,
}

impl WikiCacheRecord {
    pub fn new(wiki_structure: WikiStructure) -> Self {
        Self {
            wiki_structure,
            generated_pages: BTreeMap::new(),
        }
    }

    /// Record the generated version of a page, replacing any earlier one
    pub fn insert_generated(&mut self, page: WikiPage) {
        self.generated_pages.insert(page.id.clone(), page);
    }

    /// Ids in `generated_pages` with no page of the same id in the structure
    pub fn orphaned_pages(&self) -> Vec<&str> {
        let known: HashSet<&str> = self
            .wiki_structure
            .pages
            .iter()
            .map(|p| p.id.as_str())
            .collect();

        self.generated_pages
            .keys()
            .map(String::as_str)
            .filter(|id| !known.contains(id))
            .collect()
    }
}

/// Write request as sent by collaborators: key fields next to the record body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiCacheRequest {
    pub owner: String,
    pub repo: String,
    pub repo_type: String,
    pub language: String,
    pub wiki_structure: WikiStructure,
    pub generated_pages: BTreeMap<String, WikiPage>,
}

impl WikiCacheRequest {
    /// Split into the addressing key and the record to persist
    pub fn into_parts(self) -> (CacheKey, WikiCacheRecord) {
        let key = CacheKey::new(self.owner, self.repo, self.repo_type, self.language);
        let record = WikiCacheRecord {
            wiki_structure: self.wiki_structure,
            generated_pages: self.generated_pages,
        };
        (key, record)
    }
}
