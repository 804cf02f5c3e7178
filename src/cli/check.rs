//! Check command - report invariant violations.

use std::path::Path;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::driver::check_space;
use crate::core::platform;
use crate::error::{Error, Result};

/// Report every secret that is scoped or shares its name. Fails if any are found.
pub fn execute(config: &Config, snapshot: Option<&Path>) -> Result<()> {
    let platform = platform::open(config, snapshot)?;
    let found = check_space(platform.as_ref())?;

    if found.is_empty() {
        output::success("every secret is unique and unscoped");
        return Ok(());
    }

    let mut count = 0;
    for (owner, violations) in &found {
        output::section(&owner.to_string());
        for violation in violations {
            output::warn(&violation.to_string());
        }
        count += violations.len();
    }
    println!();
    Err(Error::Violations(count))
}
