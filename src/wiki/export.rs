//! Wiki Export
//!
//! Renders an ordered page list into a standalone Markdown or JSON document.
//! Rendering is pure given the generation timestamp; [`WikiExporter::export`]
//! stamps the current time and suggests a download file name.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::export::{
    FALLBACK_NAME, FILENAME_TIMESTAMP_FORMAT, MARKDOWN_TIMESTAMP_FORMAT,
};
use crate::types::{Result, WikiPage};

/// Output document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Markdown,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::Json => "application/json",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Markdown => write!(f, "markdown"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!(
                "Unknown export format: {}. Valid values: markdown, json",
                s
            )),
        }
    }
}

/// A rendered export ready to hand to a caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub content: String,
    /// Suggested download name, e.g. `widgets_wiki_20250101_120000.md`
    pub filename: String,
    pub media_type: &'static str,
}

impl ExportDocument {
    pub fn as_bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }
}

/// JSON export envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonExport<P> {
    pub metadata: ExportMetadata,
    pub pages: P,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub repository: String,
    pub generated_at: DateTime<Utc>,
    pub page_count: usize,
}

/// Renders wiki pages for one repository
pub struct WikiExporter {
    repository: String,
}

impl WikiExporter {
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
        }
    }

    /// Render in the requested format, stamped with the current time
    pub fn export(&self, pages: &[WikiPage], format: ExportFormat) -> Result<ExportDocument> {
        let generated_at = Utc::now();
        info!(
            "Exporting wiki for {} in {} format ({} pages)",
            self.repository,
            format,
            pages.len()
        );

        let content = match format {
            ExportFormat::Markdown => self.markdown(pages, generated_at),
            ExportFormat::Json => self.json(pages, generated_at)?,
        };

        Ok(ExportDocument {
            content,
            filename: self.filename(format, generated_at),
            media_type: format.media_type(),
        })
    }

    /// Markdown document: header, table of contents, then one section per page
    pub fn markdown(&self, pages: &[WikiPage], generated_at: DateTime<Utc>) -> String {
        // First occurrence wins if ids repeat
        let mut titles: HashMap<&str, &str> = HashMap::with_capacity(pages.len());
        for page in pages {
            titles.entry(page.id.as_str()).or_insert(page.title.as_str());
        }

        let mut output = String::new();

        output.push_str(&format!("# Wiki Documentation for {}\n\n", self.repository));
        output.push_str(&format!(
            "Generated on: {}\n\n",
            generated_at.format(MARKDOWN_TIMESTAMP_FORMAT)
        ));

        output.push_str("## Table of Contents\n\n");
        for page in pages {
            output.push_str(&format!("- [{}](#{})\n", page.title, page.id));
        }
        output.push('\n');

        for page in pages {
            output.push_str(&format!("<a id='{}'></a>\n\n", page.id));
            output.push_str(&format!("## {}\n\n", page.title));

            let related: Vec<String> = page
                .related_pages
                .iter()
                .filter_map(|id| {
                    titles
                        .get(id.as_str())
                        .map(|title| format!("[{}](#{})", title, id))
                })
                .collect();

            if !page.related_pages.is_empty() {
                output.push_str("### Related Pages\n\n");
                if !related.is_empty() {
                    output.push_str(&format!("Related topics: {}\n\n", related.join(", ")));
                }
            }

            output.push_str(&format!("{}\n\n", page.content));
            output.push_str("---\n\n");
        }

        output
    }

    /// JSON document with a metadata header and the pages in order
    pub fn json(&self, pages: &[WikiPage], generated_at: DateTime<Utc>) -> Result<String> {
        let export = JsonExport {
            metadata: ExportMetadata {
                repository: self.repository.clone(),
                generated_at,
                page_count: pages.len(),
            },
            pages,
        };

        Ok(serde_json::to_string_pretty(&export)?)
    }

    /// `<repo>_wiki_<timestamp>.<ext>` from the last path segment of the identifier
    pub fn filename(&self, format: ExportFormat, generated_at: DateTime<Utc>) -> String {
        let name = self
            .repository
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or(FALLBACK_NAME);

        format!(
            "{}_wiki_{}.{}",
            name,
            generated_at.format(FILENAME_TIMESTAMP_FORMAT),
            format.extension()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Importance;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    fn pages() -> Vec<WikiPage> {
        vec![
            WikiPage::new("overview", "Overview")
                .with_content("The widget system.")
                .with_importance(Importance::High)
                .with_file_paths(["README.md", "src/lib.rs"])
                .with_related(["storage", "ghost"]),
            WikiPage::new("storage", "Storage Layer")
                .with_content("Data lives on disk.")
                .with_importance(Importance::Low)
                .with_related(["ghost"]),
        ]
    }

    #[test]
    fn test_markdown_layout() {
        let exporter = WikiExporter::new("https://github.com/acme/widgets");
        let doc = exporter.markdown(&pages(), fixed_time());

        let expected = "\
# Wiki Documentation for https://github.com/acme/widgets

Generated on: 2025-03-14 09:26:53 UTC

## Table of Contents

- [Overview](#overview)
- [Storage Layer](#storage)

<a id='overview'></a>

## Overview

### Related Pages

Related topics: [Storage Layer](#storage)

The widget system.

---

<a id='storage'></a>

## Storage Layer

### Related Pages

Data lives on disk.

---

";
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_markdown_anchor_per_page_and_drops_unknown_links() {
        let exporter = WikiExporter::new("acme/widgets");
        let doc = exporter.markdown(&pages(), fixed_time());

        assert_eq!(doc.matches("<a id='").count(), 2);
        assert!(!doc.contains("ghost"));
    }

    #[test]
    fn test_markdown_unresolved_related_keeps_heading() {
        let exporter = WikiExporter::new("acme/widgets");
        let page = WikiPage::new("a", "A")
            .with_content("x")
            .with_related(["ghost"]);
        let doc = exporter.markdown(&[page], fixed_time());

        assert!(doc.contains("## A\n\n### Related Pages\n\nx\n\n---\n\n"));
        assert!(!doc.contains("Related topics:"));
    }

    #[test]
    fn test_markdown_no_related_no_heading() {
        let exporter = WikiExporter::new("acme/widgets");
        let doc = exporter.markdown(&[WikiPage::new("a", "A").with_content("x")], fixed_time());

        assert!(!doc.contains("### Related Pages"));
    }

    #[test]
    fn test_markdown_empty_pages() {
        let exporter = WikiExporter::new("acme/widgets");
        let doc = exporter.markdown(&[], fixed_time());

        assert_eq!(
            doc,
            "# Wiki Documentation for acme/widgets\n\n\
             Generated on: 2025-03-14 09:26:53 UTC\n\n\
             ## Table of Contents\n\n\n"
        );
        assert!(!doc.contains("<a id="));
        assert!(!doc.contains("---"));
    }

    #[test]
    fn test_markdown_is_deterministic() {
        let exporter = WikiExporter::new("acme/widgets");
        assert_eq!(
            exporter.markdown(&pages(), fixed_time()),
            exporter.markdown(&pages(), fixed_time())
        );
    }

    #[test]
    fn test_json_pages_round_trip() {
        let exporter = WikiExporter::new("acme/widgets");
        let input = pages();
        let doc = exporter.json(&input, fixed_time()).unwrap();

        let parsed: JsonExport<Vec<WikiPage>> = serde_json::from_str(&doc).unwrap();
        assert_eq!(parsed.pages, input);
        assert_eq!(parsed.metadata.repository, "acme/widgets");
        assert_eq!(parsed.metadata.page_count, 2);
        assert_eq!(parsed.metadata.generated_at, fixed_time());
    }

    #[test]
    fn test_json_two_space_indent() {
        let exporter = WikiExporter::new("acme/widgets");
        let doc = exporter.json(&pages(), fixed_time()).unwrap();

        assert!(doc.starts_with("{\n  \"metadata\": {\n    \"repository\""));
        assert!(doc.contains("\"relatedPages\""));
    }

    #[test]
    fn test_filename() {
        let time = fixed_time();
        let cases = [
            ("https://github.com/acme/widgets", "widgets_wiki_20250314_092653.md"),
            ("https://github.com/acme/widgets/", "widgets_wiki_20250314_092653.md"),
            ("widgets", "widgets_wiki_20250314_092653.md"),
            ("", "wiki_wiki_20250314_092653.md"),
        ];
        for (repo, expected) in cases {
            assert_eq!(
                WikiExporter::new(repo).filename(ExportFormat::Markdown, time),
                expected
            );
        }
        assert!(
            WikiExporter::new("acme/widgets")
                .filename(ExportFormat::Json, time)
                .ends_with(".json")
        );
    }

    #[test]
    fn test_export_document() {
        let doc = WikiExporter::new("acme/widgets")
            .export(&pages(), ExportFormat::Json)
            .unwrap();

        assert_eq!(doc.media_type, "application/json");
        assert!(doc.filename.starts_with("widgets_wiki_"));
        assert!(doc.as_bytes().starts_with(b"{"));
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("Markdown".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
