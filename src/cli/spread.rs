//! Spread command - rewrite every ambiguous secret in the space.

use dialoguer::Confirm;
use std::io::IsTerminal;
use std::path::Path;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::driver::spread_space;
use crate::core::platform;
use crate::error::{ConfigError, Result};

/// Spread the space after confirmation.
///
/// Without a terminal to prompt on, `--yes` is required.
pub fn execute(
    config: &Config,
    snapshot: Option<&Path>,
    yes: bool,
    resume_partial: bool,
) -> Result<()> {
    let mut platform = platform::open(config, snapshot)?;
    let mut options = config.spread_options();
    options.resume_partial |= resume_partial;

    if !yes && !confirm()? {
        return Err(ConfigError::NotConfirmed.into());
    }

    let report = spread_space(platform.as_mut(), &options)?;

    for collection in report.collections.iter().filter(|c| !c.renames.is_empty()) {
        output::section(&collection.owner.to_string());
        for rename in &collection.renames {
            output::list_item(&format!(
                "{} → {}",
                output::name(&rename.from),
                output::name(&rename.to)
            ));
        }
    }

    if report.renamed() == 0 {
        output::dimmed("nothing to spread");
        return Ok(());
    }

    println!();
    output::success(&format!(
        "spread {} secret{}",
        report.renamed(),
        if report.renamed() == 1 { "" } else { "s" }
    ));
    output::kv("references created:", report.references_created());
    output::kv("collections:", report.collections.len());
    Ok(())
}

fn confirm() -> Result<bool> {
    if !std::io::stdin().is_terminal() {
        return Ok(false);
    }

    output::warn("secrets will be renamed and their scopes removed");
    Confirm::new()
        .with_prompt("Continue?")
        .default(false)
        .interact()
        .map_err(Into::into)
}
