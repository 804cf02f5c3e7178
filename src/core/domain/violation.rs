//! Post-spreading invariant checks.
//!
//! Used by `scopespread check` to find collections that would still produce
//! colliding or scoped secret definitions on export.

use std::collections::HashMap;
use std::fmt;

use super::VariableCollection;

/// A collection entry that breaks a spreading invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// More than one secret shares this name.
    DuplicateSecretName { name: String, count: usize },
    /// A secret still has a scope.
    ScopedSecret { name: String, id: String },
    /// A secret name with surrounding whitespace or a trailing underscore.
    UntidyName { name: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DuplicateSecretName { name, count } => {
                write!(f, "{} sensitive variables share the name '{}'", count, name)
            }
            Violation::ScopedSecret { name, id } => {
                write!(f, "sensitive variable '{}' ({}) is scoped", name, id)
            }
            Violation::UntidyName { name } => {
                write!(
                    f,
                    "sensitive variable name '{}' has stray whitespace or underscore",
                    name
                )
            }
        }
    }
}

/// Check a collection for secrets that are not unique and unscoped.
///
/// Findings come back in collection order.
pub fn check_collection(collection: &VariableCollection) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();

    for variable in &collection.variables {
        if variable.is_secret() {
            let count = counts.entry(variable.name.as_str()).or_insert(0);
            if *count == 0 {
                order.push(variable.name.as_str());
            }
            *count += 1;

            if !variable.scope.is_empty() {
                violations.push(Violation::ScopedSecret {
                    name: variable.name.clone(),
                    id: variable.id.clone(),
                });
            }

            // only secret names come out of spreading
            if is_untidy(&variable.name) {
                violations.push(Violation::UntidyName {
                    name: variable.name.clone(),
                });
            }
        }
    }

    for name in order {
        let count = counts[name];
        if count > 1 {
            violations.push(Violation::DuplicateSecretName {
                name: name.to_string(),
                count,
            });
        }
    }

    violations
}

fn is_untidy(name: &str) -> bool {
    name.trim() != name || name.ends_with('_')
}
