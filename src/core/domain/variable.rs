//! Variables and variable collections.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::Scope;
use crate::core::types::{OwnerId, ResourceId, VariableName, VariableSetId};

/// The type tag of a variable.
///
/// Only [`VariableKind::Sensitive`] is treated as secret-bearing. Account and
/// certificate references may also be flagged sensitive by the platform but
/// are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VariableKind {
    #[default]
    String,
    Sensitive,
    Certificate,
    AmazonWebServicesAccount,
    AzureAccount,
    GoogleCloudAccount,
    WorkerPool,
    Other(String),
}

impl From<String> for VariableKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "String" => VariableKind::String,
            "Sensitive" => VariableKind::Sensitive,
            "Certificate" => VariableKind::Certificate,
            "AmazonWebServicesAccount" => VariableKind::AmazonWebServicesAccount,
            "AzureAccount" => VariableKind::AzureAccount,
            "GoogleCloudAccount" => VariableKind::GoogleCloudAccount,
            "WorkerPool" => VariableKind::WorkerPool,
            _ => VariableKind::Other(value),
        }
    }
}

impl From<VariableKind> for String {
    fn from(kind: VariableKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VariableKind::String => "String",
            VariableKind::Sensitive => "Sensitive",
            VariableKind::Certificate => "Certificate",
            VariableKind::AmazonWebServicesAccount => "AmazonWebServicesAccount",
            VariableKind::AzureAccount => "AzureAccount",
            VariableKind::GoogleCloudAccount => "GoogleCloudAccount",
            VariableKind::WorkerPool => "WorkerPool",
            VariableKind::Other(other) => other,
        };
        f.write_str(name)
    }
}

/// One configuration entry in a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Variable {
    /// Empty until the platform persists the variable.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: ResourceId,
    pub name: VariableName,
    /// Always `None` for sensitive variables read back from the platform.
    #[serde(default)]
    pub value: Option<String>,
    #[serde(rename = "Type", default)]
    pub kind: VariableKind,
    #[serde(default)]
    pub is_sensitive: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scope: Scope,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Fields this crate does not interpret (prompts, editability, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Variable {
    /// A plain, unscoped `String` variable.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// A sensitive variable as the platform returns it: no value.
    pub fn sensitive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: VariableKind::Sensitive,
            is_sensitive: true,
            ..Self::default()
        }
    }

    /// Builder-style scope setter.
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Builder-style id setter.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sensitive flag and `Sensitive` type both set.
    pub fn is_secret(&self) -> bool {
        self.is_sensitive && self.kind == VariableKind::Sensitive
    }
}

/// The variables owned by one project or library variable set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VariableCollection {
    pub id: VariableSetId,
    pub owner_id: OwnerId,
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl VariableCollection {
    pub fn new(id: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            ..Self::default()
        }
    }

    /// Variables with the given name, in collection order.
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Variable> + 'a {
        self.variables.iter().filter(move |v| v.name == name)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
