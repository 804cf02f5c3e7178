//! Domain types.

mod owner;
mod scope;
mod variable;
pub mod violation;

pub use owner::{
    DeploymentProcess, DeploymentStep, LibraryVariableSet, NamedResource, Owner, OwnerKind,
    Project,
};
pub use scope::{Scope, ScopeDimension};
pub use variable::{Variable, VariableCollection, VariableKind};
pub use violation::{check_collection, Violation};
