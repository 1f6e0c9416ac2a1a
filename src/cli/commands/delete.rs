//! Delete Command

use crate::cli::CommandContext;
use crate::cli::ui::Output;
use crate::cli::util::KeyArgs;
use crate::types::Result;

/// Remove one cached wiki. Fails with a not-found error when absent.
pub fn run(ctx: &CommandContext, key: &KeyArgs) -> Result<()> {
    let key = key.to_key();
    ctx.service
        .delete(&key.owner, &key.repo, &key.repo_type, &key.language)?;

    Output::new().success(&format!(
        "Wiki cache for {}/{} ({}) deleted",
        key.owner, key.repo, key.language
    ));
    Ok(())
}
