//! Owners of variable collections and the resources scopes point at.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::{OwnerId, ResourceId, VariableSetId};

/// A resource that only matters for its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NamedResource {
    pub id: ResourceId,
    pub name: String,
}

impl NamedResource {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Project {
    pub id: OwnerId,
    pub name: String,
    pub variable_set_id: VariableSetId,
    #[serde(default)]
    pub deployment_process_id: Option<ResourceId>,
}

/// A shared variable set, usable from many projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LibraryVariableSet {
    pub id: OwnerId,
    pub name: String,
    pub variable_set_id: VariableSetId,
}

/// A project's deployment process: steps, each holding actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeploymentProcess {
    pub id: ResourceId,
    #[serde(default)]
    pub steps: Vec<DeploymentStep>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeploymentStep {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub actions: Vec<NamedResource>,
}

impl DeploymentProcess {
    /// Every action across all steps.
    pub fn actions(&self) -> impl Iterator<Item = &NamedResource> {
        self.steps.iter().flat_map(|step| step.actions.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerKind {
    Project,
    LibraryVariableSet,
}

/// Something that holds exactly one variable collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub id: OwnerId,
    pub name: String,
    pub kind: OwnerKind,
    pub variable_set_id: VariableSetId,
}

impl From<&Project> for Owner {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            kind: OwnerKind::Project,
            variable_set_id: project.variable_set_id.clone(),
        }
    }
}

impl From<&LibraryVariableSet> for Owner {
    fn from(set: &LibraryVariableSet) -> Self {
        Self {
            id: set.id.clone(),
            name: set.name.clone(),
            kind: OwnerKind::LibraryVariableSet,
            variable_set_id: set.variable_set_id.clone(),
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            OwnerKind::Project => write!(f, "project {}", self.name),
            OwnerKind::LibraryVariableSet => write!(f, "library variable set {}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_flatten_steps() {
        let process = DeploymentProcess {
            id: "deploymentprocess-Projects-1".into(),
            steps: vec![
                DeploymentStep {
                    name: "Deploy".into(),
                    actions: vec![NamedResource::new("a1", "Deploy web")],
                },
                DeploymentStep {
                    name: "Notify".into(),
                    actions: vec![
                        NamedResource::new("a2", "Email"),
                        NamedResource::new("a3", "Slack"),
                    ],
                },
            ],
        };
        let names: Vec<_> = process.actions().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Deploy web", "Email", "Slack"]);
    }

    #[test]
    fn test_owner_display() {
        let project = Project {
            id: "Projects-1".into(),
            name: "Web".into(),
            variable_set_id: "variableset-Projects-1".into(),
            deployment_process_id: None,
        };
        assert_eq!(Owner::from(&project).to_string(), "project Web");
    }
}
