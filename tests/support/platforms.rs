//! Platform wrappers that inject failures or count calls.

use std::cell::Cell;

use scopespread::core::domain::{
    DeploymentProcess, LibraryVariableSet, NamedResource, Project, Variable, VariableCollection,
};
use scopespread::error::{PlatformError, Result};
use scopespread::{InMemory, Platform, SpaceSnapshot};

/// Rejects the `reject_at`-th call to `update_variable` (1-based); every
/// other call goes through to the wrapped space.
pub struct RejectingUpdates {
    pub inner: InMemory,
    pub updates: usize,
    pub reject_at: usize,
}

impl RejectingUpdates {
    pub fn new(space: SpaceSnapshot, reject_at: usize) -> Self {
        Self {
            inner: InMemory::new(space),
            updates: 0,
            reject_at,
        }
    }
}

impl Platform for RejectingUpdates {
    fn projects(&self) -> Result<Vec<Project>> {
        self.inner.projects()
    }

    fn library_variable_sets(&self) -> Result<Vec<LibraryVariableSet>> {
        self.inner.library_variable_sets()
    }

    fn variable_set(&self, variable_set_id: &str) -> Result<VariableCollection> {
        self.inner.variable_set(variable_set_id)
    }

    fn create_variable(&mut self, owner_id: &str, variable: &Variable) -> Result<Variable> {
        self.inner.create_variable(owner_id, variable)
    }

    fn update_variable(&mut self, owner_id: &str, variable: &Variable) -> Result<Variable> {
        self.updates += 1;
        if self.updates == self.reject_at {
            return Err(PlatformError::Rejected {
                operation: "update",
                owner: owner_id.to_string(),
                variable: variable.name.clone(),
                reason: "service unavailable".to_string(),
            }
            .into());
        }
        self.inner.update_variable(owner_id, variable)
    }

    fn environment(&self, id: &str) -> Result<NamedResource> {
        self.inner.environment(id)
    }

    fn machine(&self, id: &str) -> Result<NamedResource> {
        self.inner.machine(id)
    }

    fn channel(&self, id: &str) -> Result<NamedResource> {
        self.inner.channel(id)
    }

    fn runbook(&self, id: &str) -> Result<NamedResource> {
        self.inner.runbook(id)
    }

    fn project(&self, id: &str) -> Result<Project> {
        self.inner.project(id)
    }

    fn deployment_process(&self, id: &str) -> Result<DeploymentProcess> {
        self.inner.deployment_process(id)
    }
}

/// Counts environment lookups.
pub struct CountingLookups {
    pub inner: InMemory,
    pub environment_lookups: Cell<usize>,
}

impl CountingLookups {
    pub fn new(space: SpaceSnapshot) -> Self {
        Self {
            inner: InMemory::new(space),
            environment_lookups: Cell::new(0),
        }
    }
}

impl Platform for CountingLookups {
    fn projects(&self) -> Result<Vec<Project>> {
        self.inner.projects()
    }

    fn library_variable_sets(&self) -> Result<Vec<LibraryVariableSet>> {
        self.inner.library_variable_sets()
    }

    fn variable_set(&self, variable_set_id: &str) -> Result<VariableCollection> {
        self.inner.variable_set(variable_set_id)
    }

    fn create_variable(&mut self, owner_id: &str, variable: &Variable) -> Result<Variable> {
        self.inner.create_variable(owner_id, variable)
    }

    fn update_variable(&mut self, owner_id: &str, variable: &Variable) -> Result<Variable> {
        self.inner.update_variable(owner_id, variable)
    }

    fn environment(&self, id: &str) -> Result<NamedResource> {
        self.environment_lookups.set(self.environment_lookups.get() + 1);
        self.inner.environment(id)
    }

    fn machine(&self, id: &str) -> Result<NamedResource> {
        self.inner.machine(id)
    }

    fn channel(&self, id: &str) -> Result<NamedResource> {
        self.inner.channel(id)
    }

    fn runbook(&self, id: &str) -> Result<NamedResource> {
        self.inner.runbook(id)
    }

    fn project(&self, id: &str) -> Result<Project> {
        self.inner.project(id)
    }

    fn deployment_process(&self, id: &str) -> Result<DeploymentProcess> {
        self.inner.deployment_process(id)
    }
}
