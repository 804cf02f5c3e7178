//! Unique name building.
//!
//! A spread secret is renamed to its old name followed by the display names
//! of everything it was scoped to, e.g. `Db.Password_Production_web-server`.
//! Unscoped secrets get `_Unscoped`. If the result is taken, `_1`, `_2`, ...
//! is appended to the composed name until it is free.

use std::collections::HashSet;

use crate::core::constants::UNSCOPED_SUFFIX;
use crate::core::domain::{Variable, VariableCollection};
use crate::core::platform::Platform;
use crate::core::resolver::Resolver;
use crate::error::NamingError;

/// Names that a new variable must not take.
#[derive(Debug, Clone, Default)]
pub struct UsedNames {
    names: HashSet<String>,
}

impl UsedNames {
    /// Every name present in the collection before any change.
    pub fn from_collection(collection: &VariableCollection) -> Self {
        Self {
            names: collection.variables.iter().map(|v| v.name.clone()).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }
}

/// Build the name a variable would carry once its scope is folded into it.
///
/// Every scope entry is resolved even after a failure, so the error lists
/// all broken references of the variable at once.
///
/// # Errors
///
/// Returns `NamingError` if any scope entry cannot be resolved.
pub fn compose_name<P: Platform + ?Sized>(
    variable: &Variable,
    resolver: &mut Resolver<'_, P>,
) -> Result<String, NamingError> {
    let mut name = variable.name.trim_start().to_string();

    if variable.scope.is_empty() {
        name.push_str(UNSCOPED_SUFFIX);
    }

    let mut failures = Vec::new();
    for (dimension, entries) in variable.scope.dimensions() {
        let mut parts = Vec::with_capacity(entries.len());
        for id in entries {
            match resolver.resolve(dimension, id) {
                // blank roles and tenant tags carry nothing worth naming
                Ok(part) if part.is_empty() => {}
                Ok(part) => parts.push(part),
                Err(e) => failures.push(e),
            }
        }
        if !parts.is_empty() {
            name.push('_');
            name.push_str(&parts.join("_"));
        }
    }

    if !failures.is_empty() {
        return Err(NamingError {
            variable: variable.name.clone(),
            failures,
        });
    }

    Ok(name
        .trim_end_matches(|c: char| c == '_' || c.is_whitespace())
        .to_string())
}

/// Pick a name for `variable` that is not in `used`.
///
/// # Errors
///
/// Returns `NamingError` if any scope entry cannot be resolved; nothing is
/// partially applied.
pub fn unique_name<P: Platform + ?Sized>(
    variable: &Variable,
    used: &UsedNames,
    resolver: &mut Resolver<'_, P>,
) -> Result<String, NamingError> {
    let composed = compose_name(variable, resolver)?;
    Ok(first_free(&composed, used))
}

/// `base`, or `base_N` for the smallest N >= 1 that is free.
pub fn first_free(base: &str, used: &UsedNames) -> String {
    let mut candidate = base.to_string();
    let mut index = 1u64;
    while used.contains(&candidate) {
        candidate = format!("{}_{}", base, index);
        index += 1;
    }
    candidate
}
