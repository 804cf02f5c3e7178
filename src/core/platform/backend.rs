//! Backend selection.
//!
//! Picks the platform a command runs against: a snapshot file if one is
//! given on the command line or in the config, otherwise the configured
//! server.

use std::path::Path;

use tracing::info;

use super::{Platform, SnapshotFile};
use crate::core::config::Config;
use crate::error::{ConfigError, Result};

/// Open the platform described by `config`, with `snapshot` taking precedence.
///
/// # Errors
///
/// Returns `ConfigError::NoPlatform` if nothing is configured,
/// `ConfigError::HttpUnavailable` if a server is configured but the `http`
/// feature is off, or the backend's own error if it cannot be opened.
pub fn open(config: &Config, snapshot: Option<&Path>) -> Result<Box<dyn Platform>> {
    if let Some(path) = snapshot.or(config.platform.snapshot.as_deref()) {
        info!(path = %path.display(), "using snapshot backend");
        return Ok(Box::new(SnapshotFile::open(path)?));
    }

    match (&config.platform.server, &config.platform.space) {
        (Some(server), Some(space)) => open_http(config, server, space),
        _ => Err(ConfigError::NoPlatform.into()),
    }
}

#[cfg(feature = "http")]
fn open_http(config: &Config, server: &str, space: &str) -> Result<Box<dyn Platform>> {
    info!(server, space, "using http backend");
    let api_key = config.api_key()?;
    Ok(Box::new(super::Http::new(server, space, api_key)?))
}

#[cfg(not(feature = "http"))]
fn open_http(_config: &Config, _server: &str, _space: &str) -> Result<Box<dyn Platform>> {
    Err(ConfigError::HttpUnavailable.into())
}
