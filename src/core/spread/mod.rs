//! Variable spreading.
//!
//! Turns every scoped or name-colliding secret of a collection into a
//! uniquely named, unscoped secret, plus a scoped plain variable under the
//! old name whose value is a `#{new name}` template reference. Deployment
//! steps that used the old name keep working; the exported secrets no
//! longer collide.
//!
//! Running a pass twice changes nothing the second time: renamed secrets are
//! unscoped and unique, and references are not sensitive, so grouping never
//! selects them again.

mod grouping;
mod plan;

use tracing::debug;

use crate::core::domain::{Scope, VariableCollection};
use crate::core::platform::Platform;
use crate::core::resolver::NameCache;
use crate::error::Result;

pub use grouping::flagged_names;
pub use plan::{commit, plan, template_reference, SpreadPlan, SpreadStep};

/// Knobs for a spreading pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpreadOptions {
    /// Reuse a reference left behind by an interrupted run instead of
    /// creating a second one.
    pub resume_partial: bool,
}

/// What happened to one secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub id: String,
    pub from: String,
    pub to: String,
    pub scope: Scope,
    /// False when an existing reference was reused.
    pub reference_created: bool,
}

impl From<&SpreadStep> for Rename {
    fn from(step: &SpreadStep) -> Self {
        Self {
            id: step.original.id.clone(),
            from: step.original.name.clone(),
            to: step.renamed.name.clone(),
            scope: step.original.scope.clone(),
            reference_created: step.reference.is_some(),
        }
    }
}

/// Plan the spread of one collection with a fresh name cache.
///
/// # Errors
///
/// See [`plan`].
pub fn plan_collection<P: Platform + ?Sized>(
    collection: &VariableCollection,
    platform: &P,
    options: &SpreadOptions,
) -> Result<SpreadPlan> {
    let mut cache = NameCache::new();
    let planned = plan(collection, platform, &mut cache, options)?;
    debug!(
        owner = %collection.owner_id,
        steps = planned.steps.len(),
        lookups = cache.len(),
        "collection planned"
    );
    Ok(planned)
}

/// Spread one collection: plan, then persist every write.
///
/// # Errors
///
/// Returns the first naming, invariant or persistence failure. Writes made
/// before a persistence failure are not rolled back; rerunning the pass
/// picks up where it stopped.
pub fn spread_collection<P: Platform + ?Sized>(
    platform: &mut P,
    collection: &VariableCollection,
    options: &SpreadOptions,
) -> Result<Vec<Rename>> {
    let planned = plan_collection(collection, &*platform, options)?;
    commit(&planned, platform)?;
    Ok(planned.steps.iter().map(Rename::from).collect())
}
