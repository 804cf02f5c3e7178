//! Spreading as two phases: plan every rename, then commit the writes.
//!
//! Planning reads the collection and resolves names but never writes, so a
//! plan can be shown as a dry run. Committing replays the plan against the
//! platform: for each step the reference is created first, then the secret
//! is renamed and unscoped.

use tracing::{debug, info};

use super::SpreadOptions;
use crate::core::constants::{ORIGINAL_SCOPE_NOTE, REPLACED_ID_NOTE};
use crate::core::domain::{Variable, VariableCollection, VariableKind};
use crate::core::naming::{unique_name, UsedNames};
use crate::core::platform::Platform;
use crate::core::resolver::{NameCache, Resolver};
use crate::core::types::OwnerId;
use crate::error::{InvariantViolation, Result};

use super::grouping::flagged_names;

/// One secret to spread.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadStep {
    /// The secret as it was read.
    pub original: Variable,
    /// The secret after renaming: same id, new name, no scope.
    pub renamed: Variable,
    /// The scoped variable to create under the old name. `None` when an
    /// earlier, interrupted run already created it.
    pub reference: Option<Variable>,
}

impl SpreadStep {
    pub fn new_name(&self) -> &str {
        &self.renamed.name
    }

    /// The template expression the reference carries.
    pub fn reference_value(&self) -> String {
        template_reference(&self.renamed.name)
    }
}

/// Every write needed to spread one collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpreadPlan {
    pub owner_id: OwnerId,
    pub steps: Vec<SpreadStep>,
}

impl SpreadPlan {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// `#{name}`.
pub fn template_reference(name: &str) -> String {
    format!("#{{{}}}", name)
}

/// Work out every rename for a collection without writing anything.
///
/// # Errors
///
/// Returns `NamingError` if a scope reference cannot be resolved and
/// `InvariantViolation` if a secret arrives with a value. In both cases no
/// step of the plan has been applied.
pub fn plan<P: Platform + ?Sized>(
    collection: &VariableCollection,
    platform: &P,
    cache: &mut NameCache,
    options: &SpreadOptions,
) -> Result<SpreadPlan> {
    let flagged = flagged_names(collection);
    debug!(owner = %collection.owner_id, flagged = ?flagged, "grouped secrets");

    let mut used = UsedNames::from_collection(collection);
    let mut resolver = Resolver::new(platform, cache, &collection.owner_id);
    let mut steps = Vec::new();

    for name in &flagged {
        for variable in collection.named(name).filter(|v| v.is_secret()) {
            if variable.value.is_some() {
                return Err(InvariantViolation {
                    owner: collection.owner_id.clone(),
                    variable: variable.name.clone(),
                    id: variable.id.clone(),
                }
                .into());
            }

            let resumed = if options.resume_partial {
                existing_reference_target(collection, variable).filter(|t| !used.contains(t))
            } else {
                None
            };

            let new_name = match &resumed {
                Some(target) => target.clone(),
                None => unique_name(variable, &used, &mut resolver)?,
            };

            used.insert(new_name.clone());

            let reference = match resumed {
                Some(_) => None,
                None => Some(reference_for(variable, &new_name)),
            };

            let mut renamed = variable.clone();
            renamed.name = new_name;
            renamed.scope.clear();

            debug!(
                owner = %collection.owner_id,
                variable = %variable.name,
                new_name = %renamed.name,
                reuses_reference = reference.is_none(),
                "planned spread"
            );

            steps.push(SpreadStep {
                original: variable.clone(),
                renamed,
                reference,
            });
        }
    }

    Ok(SpreadPlan {
        owner_id: collection.owner_id.clone(),
        steps,
    })
}

/// Apply a plan. Stops at the first failed write; earlier writes stay.
///
/// # Errors
///
/// Returns `PlatformError` from the first create or update that fails.
pub fn commit<P: Platform + ?Sized>(plan: &SpreadPlan, platform: &mut P) -> Result<()> {
    for step in &plan.steps {
        if let Some(reference) = &step.reference {
            info!(
                owner = %plan.owner_id,
                name = %reference.name,
                value = %step.reference_value(),
                "recreating variable as reference"
            );
            platform.create_variable(&plan.owner_id, reference)?;
        }

        info!(
            owner = %plan.owner_id,
            from = %step.original.name,
            to = %step.renamed.name,
            "renaming secret and removing scopes"
        );
        platform.update_variable(&plan.owner_id, &step.renamed)?;
    }
    Ok(())
}

/// The scoped, non-sensitive stand-in for a secret.
fn reference_for(secret: &Variable, new_name: &str) -> Variable {
    let mut reference = secret.clone();
    append_note(&mut reference.description, REPLACED_ID_NOTE, &secret.id);
    append_note(
        &mut reference.description,
        ORIGINAL_SCOPE_NOTE,
        &secret.scope.to_json(),
    );
    reference.id.clear();
    reference.kind = VariableKind::String;
    reference.is_sensitive = false;
    reference.value = Some(template_reference(new_name));
    reference
}

fn append_note(description: &mut String, heading: &str, body: &str) {
    if !description.is_empty() {
        description.push_str("\n\n");
    }
    description.push_str(heading);
    description.push_str("\n\n");
    description.push_str(body);
}

/// Target of a reference an interrupted run already created for `secret`.
///
/// Such a reference has the secret's name and scope, is a plain `String`,
/// and records the secret's id in its audit note.
fn existing_reference_target(
    collection: &VariableCollection,
    secret: &Variable,
) -> Option<String> {
    if secret.id.is_empty() {
        return None;
    }

    collection
        .named(&secret.name)
        .filter(|v| !v.is_sensitive && v.kind == VariableKind::String && v.scope == secret.scope)
        .filter(|v| records_replaced_id(&v.description, &secret.id))
        .find_map(|v| v.value.as_deref().and_then(parse_template_reference))
}

fn records_replaced_id(description: &str, id: &str) -> bool {
    let sections: Vec<&str> = description.split("\n\n").collect();
    sections
        .windows(2)
        .any(|pair| pair[0] == REPLACED_ID_NOTE && pair[1] == id)
}

fn parse_template_reference(value: &str) -> Option<String> {
    value
        .strip_prefix("#{")
        .and_then(|rest| rest.strip_suffix('}'))
        .filter(|name| !name.is_empty() && !name.contains(['{', '}']))
        .map(str::to_string)
}
