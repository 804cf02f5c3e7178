//! Platform access.
//!
//! The spreading engine talks to the deployment platform only through the
//! [`Platform`] trait, so it can run against a live server, a snapshot file,
//! or an in-memory space in tests.
//!
//! ## Backends
//!
//! - **InMemory**: a whole space held in memory.
//! - **SnapshotFile**: a JSON space snapshot on disk, written through on every change.
//! - **Http**: Feature-gated (`http`). The platform's REST API.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Platform` trait
//! 2. Add the implementation in a new file
//! 3. Feature-gate if it pulls in heavy dependencies
//! 4. Re-export from this module

use crate::core::domain::{
    DeploymentProcess, LibraryVariableSet, NamedResource, Project, Variable, VariableCollection,
};
use crate::error::Result;

pub mod backend;
mod memory;
mod snapshot;

#[cfg(feature = "http")]
pub mod http;

pub use backend::open;
pub use memory::{InMemory, SpaceSnapshot};
pub use snapshot::SnapshotFile;

#[cfg(feature = "http")]
pub use http::Http;

/// Access to one space of the deployment platform.
///
/// Lookups return `PlatformError::NotFound` when the id does not exist, so
/// callers can tell a dangling reference from a failed request.
pub trait Platform {
    /// All projects in the space.
    fn projects(&self) -> Result<Vec<Project>>;

    /// All library (shared) variable sets in the space.
    fn library_variable_sets(&self) -> Result<Vec<LibraryVariableSet>>;

    /// Fetch a variable collection by its id.
    fn variable_set(&self, variable_set_id: &str) -> Result<VariableCollection>;

    /// Add a variable to the owner's collection.
    ///
    /// # Returns
    ///
    /// The persisted variable, with its new id.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Rejected` if the platform refuses the write.
    fn create_variable(&mut self, owner_id: &str, variable: &Variable) -> Result<Variable>;

    /// Replace an existing variable (matched by id) in the owner's collection.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Rejected` if the platform refuses the write
    /// or the variable does not exist.
    fn update_variable(&mut self, owner_id: &str, variable: &Variable) -> Result<Variable>;

    fn environment(&self, id: &str) -> Result<NamedResource>;

    fn machine(&self, id: &str) -> Result<NamedResource>;

    fn channel(&self, id: &str) -> Result<NamedResource>;

    fn runbook(&self, id: &str) -> Result<NamedResource>;

    fn project(&self, id: &str) -> Result<Project>;

    fn deployment_process(&self, id: &str) -> Result<DeploymentProcess>;
}

impl<P: Platform + ?Sized> Platform for Box<P> {
    fn projects(&self) -> Result<Vec<Project>> {
        (**self).projects()
    }

    fn library_variable_sets(&self) -> Result<Vec<LibraryVariableSet>> {
        (**self).library_variable_sets()
    }

    fn variable_set(&self, variable_set_id: &str) -> Result<VariableCollection> {
        (**self).variable_set(variable_set_id)
    }

    fn create_variable(&mut self, owner_id: &str, variable: &Variable) -> Result<Variable> {
        (**self).create_variable(owner_id, variable)
    }

    fn update_variable(&mut self, owner_id: &str, variable: &Variable) -> Result<Variable> {
        (**self).update_variable(owner_id, variable)
    }

    fn environment(&self, id: &str) -> Result<NamedResource> {
        (**self).environment(id)
    }

    fn machine(&self, id: &str) -> Result<NamedResource> {
        (**self).machine(id)
    }

    fn channel(&self, id: &str) -> Result<NamedResource> {
        (**self).channel(id)
    }

    fn runbook(&self, id: &str) -> Result<NamedResource> {
        (**self).runbook(id)
    }

    fn project(&self, id: &str) -> Result<Project> {
        (**self).project(id)
    }

    fn deployment_process(&self, id: &str) -> Result<DeploymentProcess> {
        (**self).deployment_process(id)
    }
}
