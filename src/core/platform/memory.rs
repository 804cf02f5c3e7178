//! In-memory platform backend.
//!
//! Holds a whole space as plain data. Created variables get a fresh UUID,
//! updates must name an existing variable.

use serde::{Deserialize, Serialize};
use tracing::trace;
use uuid::Uuid;

use super::Platform;
use crate::core::domain::{
    DeploymentProcess, LibraryVariableSet, NamedResource, Project, Variable, VariableCollection,
};
use crate::error::{PlatformError, Result};

/// Everything the engine reads from or writes to in one space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpaceSnapshot {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub library_variable_sets: Vec<LibraryVariableSet>,
    #[serde(default)]
    pub variable_sets: Vec<VariableCollection>,
    #[serde(default)]
    pub environments: Vec<NamedResource>,
    #[serde(default)]
    pub machines: Vec<NamedResource>,
    #[serde(default)]
    pub channels: Vec<NamedResource>,
    #[serde(default)]
    pub runbooks: Vec<NamedResource>,
    #[serde(default)]
    pub deployment_processes: Vec<DeploymentProcess>,
}

impl SpaceSnapshot {
    /// The collection owned by `owner_id`, if any.
    pub fn collection_for_owner(&self, owner_id: &str) -> Option<&VariableCollection> {
        self.variable_sets.iter().find(|set| set.owner_id == owner_id)
    }

    /// Give every variable with a blank id a fresh one. Returns how many
    /// were assigned.
    pub fn assign_missing_ids(&mut self) -> usize {
        let mut assigned = 0;
        for variable in self
            .variable_sets
            .iter_mut()
            .flat_map(|set| set.variables.iter_mut())
            .filter(|v| v.id.trim().is_empty())
        {
            variable.id = Uuid::new_v4().to_string();
            assigned += 1;
        }
        assigned
    }
}

/// A space held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemory {
    space: SpaceSnapshot,
}

impl InMemory {
    pub fn new(space: SpaceSnapshot) -> Self {
        Self { space }
    }

    /// Current contents of the space.
    pub fn space(&self) -> &SpaceSnapshot {
        &self.space
    }

    pub fn into_space(self) -> SpaceSnapshot {
        self.space
    }

    fn owned_collection(
        &mut self,
        operation: &'static str,
        owner_id: &str,
        variable: &Variable,
    ) -> Result<&mut VariableCollection> {
        self.space
            .variable_sets
            .iter_mut()
            .find(|set| set.owner_id == owner_id)
            .ok_or_else(|| reject(operation, owner_id, variable, "owner has no variable set"))
    }
}

fn find_named(items: &[NamedResource], kind: &'static str, id: &str) -> Result<NamedResource> {
    items
        .iter()
        .find(|item| item.id == id)
        .cloned()
        .ok_or_else(|| not_found(kind, id))
}

fn not_found(kind: &'static str, id: &str) -> crate::error::Error {
    PlatformError::NotFound {
        kind,
        id: id.to_string(),
    }
    .into()
}

fn reject(
    operation: &'static str,
    owner_id: &str,
    variable: &Variable,
    reason: &str,
) -> crate::error::Error {
    PlatformError::Rejected {
        operation,
        owner: owner_id.to_string(),
        variable: variable.name.clone(),
        reason: reason.to_string(),
    }
    .into()
}

impl Platform for InMemory {
    fn projects(&self) -> Result<Vec<Project>> {
        Ok(self.space.projects.clone())
    }

    fn library_variable_sets(&self) -> Result<Vec<LibraryVariableSet>> {
        Ok(self.space.library_variable_sets.clone())
    }

    fn variable_set(&self, variable_set_id: &str) -> Result<VariableCollection> {
        self.space
            .variable_sets
            .iter()
            .find(|set| set.id == variable_set_id)
            .cloned()
            .ok_or_else(|| not_found("variable set", variable_set_id))
    }

    fn create_variable(&mut self, owner_id: &str, variable: &Variable) -> Result<Variable> {
        if variable.name.trim().is_empty() {
            return Err(reject("create", owner_id, variable, "name is empty"));
        }

        let collection = self.owned_collection("create", owner_id, variable)?;
        let mut created = variable.clone();
        created.id = Uuid::new_v4().to_string();
        trace!(owner = owner_id, id = %created.id, name = %created.name, "variable created");
        collection.variables.push(created.clone());
        Ok(created)
    }

    fn update_variable(&mut self, owner_id: &str, variable: &Variable) -> Result<Variable> {
        if variable.name.trim().is_empty() {
            return Err(reject("update", owner_id, variable, "name is empty"));
        }

        let collection = self.owned_collection("update", owner_id, variable)?;
        let slot = collection
            .variables
            .iter_mut()
            .find(|existing| !variable.id.is_empty() && existing.id == variable.id)
            .ok_or_else(|| reject("update", owner_id, variable, "no variable with this id"))?;
        *slot = variable.clone();
        trace!(owner = owner_id, id = %variable.id, name = %variable.name, "variable updated");
        Ok(variable.clone())
    }

    fn environment(&self, id: &str) -> Result<NamedResource> {
        find_named(&self.space.environments, "environment", id)
    }

    fn machine(&self, id: &str) -> Result<NamedResource> {
        find_named(&self.space.machines, "machine", id)
    }

    fn channel(&self, id: &str) -> Result<NamedResource> {
        find_named(&self.space.channels, "channel", id)
    }

    fn runbook(&self, id: &str) -> Result<NamedResource> {
        find_named(&self.space.runbooks, "runbook", id)
    }

    fn project(&self, id: &str) -> Result<Project> {
        self.space
            .projects
            .iter()
            .find(|project| project.id == id)
            .cloned()
            .ok_or_else(|| not_found("project", id))
    }

    fn deployment_process(&self, id: &str) -> Result<DeploymentProcess> {
        self.space
            .deployment_processes
            .iter()
            .find(|process| process.id == id)
            .cloned()
            .ok_or_else(|| not_found("deployment process", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn space() -> InMemory {
        InMemory::new(SpaceSnapshot {
            environments: vec![NamedResource::new("Environments-1", "Dev")],
            variable_sets: vec![VariableCollection::new("variableset-Projects-1", "Projects-1")],
            ..SpaceSnapshot::default()
        })
    }

    #[test]
    fn test_create_assigns_id() {
        let mut platform = space();
        let created = platform
            .create_variable("Projects-1", &Variable::new("Name", "value"))
            .unwrap();
        assert!(!created.id.is_empty());

        let set = platform.variable_set("variableset-Projects-1").unwrap();
        assert_eq!(set.variables, vec![created]);
    }

    #[test]
    fn test_update_unknown_variable_is_rejected() {
        let mut platform = space();
        let err = platform
            .update_variable("Projects-1", &Variable::new("Name", "v").with_id("missing"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Platform(PlatformError::Rejected { operation: "update", .. })
        ));
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut platform = space();
        let created = platform
            .create_variable("Projects-1", &Variable::new("Name", "v"))
            .unwrap();
        let mut renamed = created.clone();
        renamed.name = "Other".to_string();
        platform.update_variable("Projects-1", &renamed).unwrap();

        let set = platform.variable_set("variableset-Projects-1").unwrap();
        assert_eq!(set.variables.len(), 1);
        assert_eq!(set.variables[0].name, "Other");
    }

    #[test]
    fn test_lookup_not_found() {
        let platform = space();
        assert_eq!(platform.environment("Environments-1").unwrap().name, "Dev");
        assert!(matches!(
            platform.environment("Environments-2").unwrap_err(),
            Error::Platform(PlatformError::NotFound {
                kind: "environment",
                ..
            })
        ));
    }

    #[test]
    fn test_create_for_unknown_owner_is_rejected() {
        let mut platform = space();
        assert!(platform
            .create_variable("Projects-9", &Variable::new("Name", "v"))
            .is_err());
    }
}
