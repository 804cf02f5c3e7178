//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A variable name. Not unique within a collection.
pub type VariableName = String;

/// An opaque platform identifier (e.g. `Environments-1`, `Projects-42`).
pub type ResourceId = String;

/// The id of the project or library variable set that owns a collection.
pub type OwnerId = String;

/// The id of a variable collection (e.g. `variableset-Projects-1`).
pub type VariableSetId = String;
