//! Migration driver.
//!
//! Walks every library variable set and project in the space and spreads
//! their collections one at a time. Collections are never processed
//! concurrently: two passes over the same owner would both start from the
//! same used-name baseline.

use tracing::{debug, info, warn};

use crate::core::domain::{check_collection, Owner, VariableCollection, Violation};
use crate::core::platform::Platform;
use crate::core::spread::{plan_collection, spread_collection, Rename, SpreadOptions, SpreadPlan};
use crate::error::{Error, Result};

/// Result of spreading one owner's collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionReport {
    pub owner: Owner,
    pub renames: Vec<Rename>,
}

/// Result of a whole-space run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpaceReport {
    pub collections: Vec<CollectionReport>,
}

impl SpaceReport {
    /// Number of secrets renamed across the space.
    pub fn renamed(&self) -> usize {
        self.collections.iter().map(|c| c.renames.len()).sum()
    }

    /// Number of reference variables created across the space.
    pub fn references_created(&self) -> usize {
        self.collections
            .iter()
            .flat_map(|c| c.renames.iter())
            .filter(|r| r.reference_created)
            .count()
    }
}

/// Library variable sets first, then projects.
///
/// # Errors
///
/// Returns the platform error if either listing fails.
pub fn owners<P: Platform + ?Sized>(platform: &P) -> Result<Vec<Owner>> {
    let library_sets = platform.library_variable_sets()?;
    let projects = platform.projects()?;
    debug!(
        library_variable_sets = library_sets.len(),
        projects = projects.len(),
        "enumerated owners"
    );

    Ok(library_sets
        .iter()
        .map(Owner::from)
        .chain(projects.iter().map(Owner::from))
        .collect())
}

fn fetch<P: Platform + ?Sized>(platform: &P, owner: &Owner) -> Result<VariableCollection> {
    let mut collection = platform
        .variable_set(&owner.variable_set_id)
        .map_err(|e| Error::in_collection(owner.to_string(), e))?;
    if collection.owner_id.is_empty() {
        collection.owner_id = owner.id.clone();
    }
    Ok(collection)
}

/// Spread every secret-valued, ambiguously scoped variable in the space.
///
/// Stops at the first collection that fails. Collections finished before
/// that stay spread; a rerun skips them.
///
/// # Errors
///
/// Returns `Error::Collection` naming the owner whose collection failed.
pub fn spread_space<P: Platform + ?Sized>(
    platform: &mut P,
    options: &SpreadOptions,
) -> Result<SpaceReport> {
    let mut report = SpaceReport::default();

    for owner in owners(&*platform)? {
        let collection = fetch(&*platform, &owner)?;
        debug!(owner = %owner, variables = collection.variables.len(), "spreading collection");

        let renames = spread_collection(platform, &collection, options).map_err(|e| {
            if e.is_fatal() {
                warn!(owner = %owner, "invariant violated, stopping run");
            }
            Error::in_collection(owner.to_string(), e)
        })?;

        if !renames.is_empty() {
            info!(owner = %owner, renamed = renames.len(), "collection spread");
        }
        report.collections.push(CollectionReport { owner, renames });
    }

    Ok(report)
}

/// Plan every collection in the space without writing anything.
///
/// # Errors
///
/// Returns `Error::Collection` naming the first owner that cannot be planned.
pub fn plan_space<P: Platform + ?Sized>(
    platform: &P,
    options: &SpreadOptions,
) -> Result<Vec<(Owner, SpreadPlan)>> {
    let mut plans = Vec::new();
    for owner in owners(platform)? {
        let collection = fetch(platform, &owner)?;
        let planned = plan_collection(&collection, platform, options)
            .map_err(|e| Error::in_collection(owner.to_string(), e))?;
        plans.push((owner, planned));
    }
    Ok(plans)
}

/// Every invariant violation in the space, per owner. Owners with none are
/// left out.
///
/// # Errors
///
/// Returns the platform error if listing owners or fetching a collection fails.
pub fn check_space<P: Platform + ?Sized>(platform: &P) -> Result<Vec<(Owner, Vec<Violation>)>> {
    let mut found = Vec::new();
    for owner in owners(platform)? {
        let collection = fetch(platform, &owner)?;
        let violations = check_collection(&collection);
        if !violations.is_empty() {
            found.push((owner, violations));
        }
    }
    Ok(found)
}
