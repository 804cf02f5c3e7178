//! Variable scope.
//!
//! A scope restricts where a variable's value applies. Each dimension is an
//! ordered list of identifiers; a variable with every dimension empty applies
//! everywhere.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::ResourceId;

/// One dimension of a [`Scope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScopeDimension {
    Environments,
    Machines,
    Roles,
    Actions,
    TenantTags,
    Channels,
    ProcessOwners,
}

impl ScopeDimension {
    /// Every dimension, in the order names are composed.
    pub const ALL: [ScopeDimension; 7] = [
        ScopeDimension::Environments,
        ScopeDimension::Machines,
        ScopeDimension::Roles,
        ScopeDimension::Actions,
        ScopeDimension::TenantTags,
        ScopeDimension::Channels,
        ScopeDimension::ProcessOwners,
    ];
}

impl fmt::Display for ScopeDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScopeDimension::Environments => "Environment",
            ScopeDimension::Machines => "Machine",
            ScopeDimension::Roles => "Role",
            ScopeDimension::Actions => "Action",
            ScopeDimension::TenantTags => "Tenant Tag",
            ScopeDimension::Channels => "Channel",
            ScopeDimension::ProcessOwners => "Process Owner",
        };
        f.write_str(label)
    }
}

/// The set of dimensions a variable applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    #[serde(rename = "Environment", default, skip_serializing_if = "Vec::is_empty")]
    pub environments: Vec<ResourceId>,
    #[serde(rename = "Machine", default, skip_serializing_if = "Vec::is_empty")]
    pub machines: Vec<ResourceId>,
    #[serde(rename = "Role", default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    #[serde(rename = "Action", default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ResourceId>,
    #[serde(rename = "TenantTag", default, skip_serializing_if = "Vec::is_empty")]
    pub tenant_tags: Vec<String>,
    #[serde(rename = "Channel", default, skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<ResourceId>,
    #[serde(rename = "ProcessOwner", default, skip_serializing_if = "Vec::is_empty")]
    pub process_owners: Vec<ResourceId>,
}

impl Scope {
    /// True when every dimension is empty.
    pub fn is_empty(&self) -> bool {
        ScopeDimension::ALL
            .iter()
            .all(|dimension| self.get(*dimension).is_empty())
    }

    /// Entries of a single dimension.
    pub fn get(&self, dimension: ScopeDimension) -> &[String] {
        match dimension {
            ScopeDimension::Environments => &self.environments,
            ScopeDimension::Machines => &self.machines,
            ScopeDimension::Roles => &self.roles,
            ScopeDimension::Actions => &self.actions,
            ScopeDimension::TenantTags => &self.tenant_tags,
            ScopeDimension::Channels => &self.channels,
            ScopeDimension::ProcessOwners => &self.process_owners,
        }
    }

    /// Non-empty dimensions in naming order.
    pub fn dimensions(&self) -> impl Iterator<Item = (ScopeDimension, &[String])> {
        ScopeDimension::ALL
            .into_iter()
            .map(move |dimension| (dimension, self.get(dimension)))
            .filter(|(_, entries)| !entries.is_empty())
    }

    /// Remove every restriction.
    pub fn clear(&mut self) {
        *self = Scope::default();
    }

    /// Compact JSON rendering, used in audit notes.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}
