//! Get Command
//!
//! Print a cached wiki record. A missing record is not an error.

use crate::cli::CommandContext;
use crate::cli::ui::Output;
use crate::cli::util::KeyArgs;
use crate::types::Result;

pub fn run(ctx: &CommandContext, key: &KeyArgs, format: &str) -> Result<()> {
    let key = key.to_key();
    let record = ctx
        .service
        .get(&key.owner, &key.repo, &key.repo_type, &key.language)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let output = Output::new();
    let Some(record) = record else {
        output.info(&format!("No cached wiki for {}", key));
        return Ok(());
    };

    let structure = &record.wiki_structure;
    output.header(&structure.title);
    if !structure.description.is_empty() {
        println!("{}", structure.description);
    }

    output.section(&format!("Pages ({})", structure.pages.len()));
    for page in &structure.pages {
        let generated = if record.generated_pages.contains_key(&page.id) {
            "generated"
        } else {
            "pending"
        };
        println!("  {} [{}] {}", page.title, page.importance, generated);
        output.detail("id", &page.id);
        if !page.file_paths.is_empty() {
            output.detail("files", &page.file_paths.join(", "));
        }
    }

    let orphans = record.orphaned_pages();
    if !orphans.is_empty() {
        output.warning(&format!(
            "{} generated pages are not in the structure: {}",
            orphans.len(),
            orphans.join(", ")
        ));
    }

    Ok(())
}
