//! Put Command
//!
//! Store a wiki record read from a JSON file.

use std::path::Path;

use crate::cli::ui::Output;
use crate::cli::util::{KeyArgs, read_json_file};
use crate::cli::CommandContext;
use crate::types::{Result, WikiCacheRecord, WikiCacheRequest};

/// Store a bare record (`wiki_structure` + `generated_pages`) under the given key
pub fn run(ctx: &CommandContext, key: &KeyArgs, file: &Path) -> Result<()> {
    let record: WikiCacheRecord = read_json_file(file)?;
    let key = key.to_key();

    ctx.service
        .put(&key.owner, &key.repo, &key.repo_type, &key.language, &record)?;

    Output::new().success(&format!(
        "Wiki cache saved for {} ({} pages)",
        key,
        record.wiki_structure.pages.len()
    ));
    Ok(())
}

/// Store a request file that carries owner/repo/repo_type/language inline
pub fn run_request(ctx: &CommandContext, file: &Path) -> Result<()> {
    let request: WikiCacheRequest = read_json_file(file)?;
    let page_count = request.wiki_structure.pages.len();

    let key = ctx.service.put_request(request)?;

    Output::new().success(&format!(
        "Wiki cache saved for {} ({} pages)",
        key, page_count
    ));
    Ok(())
}
