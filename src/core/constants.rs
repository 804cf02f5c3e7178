//! Constants used throughout scopespread.
//!
//! Centralizes magic strings and configuration values.

/// Configuration file name (.scopespread.toml).
pub const CONFIG_FILE: &str = ".scopespread.toml";

/// Environment variable controlling the log filter.
pub const LOG_ENV: &str = "SCOPESPREAD_LOG";

/// Default environment variable holding the platform API key.
pub const DEFAULT_API_KEY_ENV: &str = "OCTOPUS_API_KEY";

/// Header carrying the API key on every platform request.
pub const API_KEY_HEADER: &str = "X-Octopus-ApiKey";

/// Suffix appended to the name of a secret that has no scope.
pub const UNSCOPED_SUFFIX: &str = "_Unscoped";

/// Process owner ids with this prefix refer to runbooks; all others to projects.
pub const RUNBOOK_ID_PREFIX: &str = "Runbooks-";

/// Audit note heading recording the id of the secret a reference replaced.
pub const REPLACED_ID_NOTE: &str = "Replaced variable ID";

/// Audit note heading recording the scope the secret had before spreading.
pub const ORIGINAL_SCOPE_NOTE: &str = "Original Scope";
