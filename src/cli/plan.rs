//! Plan command - dry run of spread.

use std::path::Path;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::driver::plan_space;
use crate::core::platform;
use crate::error::Result;

/// Print every rename spread would perform.
pub fn execute(config: &Config, snapshot: Option<&Path>) -> Result<()> {
    let platform = platform::open(config, snapshot)?;
    let plans = plan_space(platform.as_ref(), &config.spread_options())?;

    let mut total = 0;
    for (owner, plan) in plans.iter().filter(|(_, p)| !p.is_empty()) {
        output::section(&owner.to_string());
        for step in &plan.steps {
            let reference = match &step.reference {
                Some(_) => format!("reference {}", step.reference_value()),
                None => "existing reference".to_string(),
            };
            output::list_item(&format!(
                "{} → {}  ({})",
                output::name(&step.original.name),
                output::name(step.new_name()),
                reference
            ));
        }
        total += plan.steps.len();
    }

    if total == 0 {
        output::dimmed("nothing to spread");
    } else {
        println!();
        output::kv("would spread:", total);
    }
    Ok(())
}
