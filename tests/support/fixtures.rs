//! Space fixtures.

use scopespread::core::domain::{
    DeploymentProcess, DeploymentStep, LibraryVariableSet, NamedResource, Project, Scope,
    Variable, VariableCollection, VariableKind,
};
use scopespread::SpaceSnapshot;

pub const LIBRARY_SET_ID: &str = "LibraryVariableSets-1";
pub const PROJECT_ID: &str = "Projects-1";

/// A scope holding only environments.
pub fn environments(ids: &[&str]) -> Scope {
    Scope {
        environments: ids.iter().map(|id| id.to_string()).collect(),
        ..Scope::default()
    }
}

fn resources(space: &mut SpaceSnapshot) {
    space.environments = vec![
        NamedResource::new("Environments-1", "Development"),
        NamedResource::new("Environments-2", "Test"),
        NamedResource::new("Environments-3", "Production"),
    ];
    space.machines = vec![NamedResource::new("Machines-1", "web01")];
    space.channels = vec![NamedResource::new("Channels-1", "Hotfix")];
    space.runbooks = vec![NamedResource::new("Runbooks-1", "Rotate keys")];
}

/// A library variable set with 11 variables, four of them a scoped
/// `Test.SecretVariable` family and a plain variable already holding the
/// name the unscoped family member would get.
pub fn library_space() -> SpaceSnapshot {
    let mut space = SpaceSnapshot::default();
    resources(&mut space);

    space.library_variable_sets = vec![LibraryVariableSet {
        id: LIBRARY_SET_ID.to_string(),
        name: "Shared secrets".to_string(),
        variable_set_id: "variableset-LibraryVariableSets-1".to_string(),
    }];

    let mut set = VariableCollection::new("variableset-LibraryVariableSets-1", LIBRARY_SET_ID);
    set.variables = vec![
        Variable::new("RegularVariable", "regular").with_id("lib-1"),
        Variable::new("Test.SecretVariable_Unscoped", "bait").with_id("lib-2"),
        Variable::sensitive("Test.SecretVariable")
            .with_id("lib-3")
            .with_scope(environments(&["Environments-1"])),
        Variable::sensitive("Test.SecretVariable")
            .with_id("lib-4")
            .with_scope(environments(&["Environments-2"])),
        Variable::sensitive("Test.SecretVariable")
            .with_id("lib-5")
            .with_scope(environments(&["Environments-3"])),
        Variable::sensitive("Test.SecretVariable").with_id("lib-6"),
        Variable::sensitive("Unique.Secret").with_id("lib-7"),
        Variable::new("Extra.Variable1", "one").with_id("lib-8"),
        Variable::new("Extra.Variable2", "two").with_id("lib-9"),
        Variable::new("Extra.Variable3", "three").with_id("lib-10"),
        Variable::new("Extra.Variable4", "four").with_id("lib-11"),
    ];
    space.variable_sets.push(set);
    space
}

/// A project whose secrets are scoped across every dimension, next to a
/// plain namesake and a non-sensitive account variable.
pub fn project_space() -> SpaceSnapshot {
    let mut space = SpaceSnapshot::default();
    resources(&mut space);

    space.projects = vec![Project {
        id: PROJECT_ID.to_string(),
        name: "Web".to_string(),
        variable_set_id: "variableset-Projects-1".to_string(),
        deployment_process_id: Some("deploymentprocess-Projects-1".to_string()),
    }];
    space.deployment_processes = vec![DeploymentProcess {
        id: "deploymentprocess-Projects-1".to_string(),
        steps: vec![DeploymentStep {
            name: "Deploy".to_string(),
            actions: vec![NamedResource::new("Actions-1", "Deploy web")],
        }],
    }];

    let everything = Scope {
        environments: vec!["Environments-3".to_string()],
        machines: vec!["Machines-1".to_string()],
        roles: vec!["web".to_string()],
        actions: vec!["Actions-1".to_string()],
        tenant_tags: vec!["Region/EU".to_string()],
        channels: vec!["Channels-1".to_string()],
        process_owners: vec!["Runbooks-1".to_string()],
    };
    let development = Scope {
        environments: vec!["Environments-1".to_string()],
        process_owners: vec![PROJECT_ID.to_string()],
        ..Scope::default()
    };

    let mut set = VariableCollection::new("variableset-Projects-1", PROJECT_ID);
    set.variables = vec![
        Variable::sensitive("Api.Key")
            .with_id("proj-1")
            .with_scope(everything),
        Variable::sensitive("Api.Key")
            .with_id("proj-2")
            .with_scope(development),
        Variable::new("Api.Key", "not-a-secret").with_id("proj-3"),
        Variable {
            kind: VariableKind::AmazonWebServicesAccount,
            ..Variable::new("Api.Key", "Accounts-1").with_id("proj-4")
        },
        Variable::sensitive("Lonely.Secret").with_id("proj-5"),
    ];
    space.variable_sets.push(set);
    space
}

/// Both scenarios in one space.
pub fn full_space() -> SpaceSnapshot {
    let mut space = library_space();
    let project = project_space();
    space.projects = project.projects;
    space.deployment_processes = project.deployment_processes;
    space.variable_sets.extend(project.variable_sets);
    space
}

/// The collection owned by `owner_id`.
pub fn collection<'a>(space: &'a SpaceSnapshot, owner_id: &str) -> &'a VariableCollection {
    space
        .collection_for_owner(owner_id)
        .expect("owner has no variable set")
}
