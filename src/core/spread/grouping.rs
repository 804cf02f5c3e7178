//! Selection of the variable names that need spreading.

use crate::core::domain::VariableCollection;

/// Names of secrets that must be spread, in order of first appearance.
///
/// A secret qualifies when it is scoped, or when it is unscoped but another
/// sensitive variable shares its name. An unscoped secret with a name of its
/// own is already exportable and is left alone.
pub fn flagged_names(collection: &VariableCollection) -> Vec<String> {
    let mut flagged: Vec<String> = Vec::new();

    for (index, variable) in collection.variables.iter().enumerate() {
        if !variable.is_secret() {
            continue;
        }
        if variable.scope.is_empty() && !shares_name(collection, index) {
            continue;
        }

        if !flagged.iter().any(|name| *name == variable.name) {
            flagged.push(variable.name.clone());
        }
    }

    flagged
}

/// Whether another sensitive variable has the name of the one at `index`.
///
/// Compared by position: ids can be blank in hand-written snapshots.
fn shares_name(collection: &VariableCollection, index: usize) -> bool {
    let name = &collection.variables[index].name;
    collection
        .variables
        .iter()
        .enumerate()
        .any(|(other_index, other)| {
            other_index != index && other.is_sensitive && other.name == *name
        })
}
