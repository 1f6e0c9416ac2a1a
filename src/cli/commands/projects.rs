//! Projects Command
//!
//! List processed projects found in the wiki cache.

use crate::cli::CommandContext;
use crate::cli::ui::Output;
use crate::types::Result;

pub fn run(ctx: &CommandContext, format: &str) -> Result<()> {
    let projects = ctx.service.list_projects();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    let output = Output::new();
    if projects.is_empty() {
        output.info(&format!(
            "No processed projects in {}",
            ctx.service.cache().root().display()
        ));
        return Ok(());
    }

    output.section(&format!("Processed Projects ({})", projects.len()));
    for project in &projects {
        println!(
            "  {} [{}] {}",
            project.name, project.repo_type, project.language
        );
        output.detail(
            "cached",
            &project.cached_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        );
    }

    Ok(())
}
