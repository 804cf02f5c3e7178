//! Error types.
//!
//! Each concern gets its own enum; all of them fold into [`Error`] so the
//! engine and the CLI share a single `Result` alias.

use std::fmt;

use thiserror::Error;

use crate::core::domain::ScopeDimension;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Naming(#[from] NamingError),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    /// A failure while processing one owner's variable collection.
    #[error("failed to spread variables for {owner}: {source}")]
    Collection {
        owner: String,
        #[source]
        source: Box<Error>,
    },

    /// `check` found collections that break the spreading invariants.
    #[error("found {0} invariant violation(s)")]
    Violations(usize),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an error with the owner whose collection was being processed.
    pub fn in_collection(owner: impl Into<String>, source: Error) -> Self {
        Error::Collection {
            owner: owner.into(),
            source: Box::new(source),
        }
    }

    /// Whether the error must stop the whole run, not just the current collection.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Invariant(_) => true,
            Error::Collection { source, .. } => source.is_fatal(),
            _ => false,
        }
    }
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("no platform configured: pass --snapshot or set [platform] in .scopespread.toml")]
    NoPlatform,

    #[error("environment variable {0} is not set")]
    MissingApiKey(String),

    #[error("the http backend is not available in this build (enable the `http` feature)")]
    HttpUnavailable,

    #[error("refusing to spread without confirmation: re-run with --yes")]
    NotConfirmed,
}

/// Errors raised by a platform backend.
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// A create or update call was refused.
    #[error("platform rejected {operation} of variable '{variable}' in {owner}: {reason}")]
    Rejected {
        operation: &'static str,
        owner: String,
        variable: String,
        reason: String,
    },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("snapshot {path}: {source}")]
    SnapshotIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A scope reference that could not be turned into a display name.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("{dimension} with ID {id} not found")]
    ResourceNotFound {
        dimension: ScopeDimension,
        id: String,
    },

    #[error("could not find action {action} in the deployment process of {project}")]
    ActionNotFound { action: String, project: String },

    #[error("lookup of {dimension} {id} failed: {source}")]
    Lookup {
        dimension: ScopeDimension,
        id: String,
        #[source]
        source: Box<Error>,
    },
}

/// Every resolution failure hit while naming one variable.
#[derive(Debug)]
pub struct NamingError {
    pub variable: String,
    pub failures: Vec<ResolveError>,
}

impl fmt::Display for NamingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not build a unique name for '{}': ", self.variable)?;
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for NamingError {}

/// A sensitive variable arrived carrying a value.
#[derive(Error, Debug)]
#[error("sensitive variable '{variable}' ({id}) in {owner} has a value; refusing to touch it")]
pub struct InvariantViolation {
    pub owner: String,
    pub variable: String,
    pub id: String,
}

pub type Result<T> = std::result::Result<T, Error>;
