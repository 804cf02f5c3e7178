//! Configuration file management.
//!
//! Handles reading and validating `.scopespread.toml`. The file is optional;
//! without it every setting comes from the command line.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants;
use crate::core::spread::SpreadOptions;
use crate::error::{ConfigError, Result};

/// Settings stored in `.scopespread.toml`
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where the space lives
    #[serde(default)]
    pub platform: PlatformConfig,
    /// Spreading behaviour
    #[serde(default)]
    pub spread: SpreadConfig,
}

/// Platform connection settings.
///
/// Either `snapshot` or `server` + `space` must be set for a run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Base URL of the platform, e.g. `https://deploy.example.com`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    /// Space id, e.g. `Spaces-1`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,
    /// Name of the environment variable holding the API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// JSON space snapshot to operate on instead of a server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadConfig {
    #[serde(default)]
    pub resume_partial: bool,
}

impl Config {
    /// Path to the configuration file in the current directory
    pub fn config_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `.scopespread.toml` in the
    /// current directory is read if present, otherwise defaults are used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file cannot be read, or
    /// `ConfigError::Parse` / `ConfigError::InvalidValue` if it is malformed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load and validate configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration contents
    ///
    /// Checks:
    /// - `server` is an http(s) URL
    /// - `space` is set whenever `server` is
    /// - `api_key_env` and `snapshot` are not blank
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on validation failure.
    pub fn validate(&self) -> Result<()> {
        debug!("validating config");

        if let Some(server) = &self.platform.server {
            let server = server.trim();
            if !(server.starts_with("http://") || server.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    field: "platform.server",
                    reason: format!("not an http(s) URL: {}", server),
                }
                .into());
            }

            if self
                .platform
                .space
                .as_deref()
                .map_or(true, |space| space.trim().is_empty())
            {
                return Err(ConfigError::InvalidValue {
                    field: "platform.space",
                    reason: "required when platform.server is set".to_string(),
                }
                .into());
            }
        }

        if let Some(env) = &self.platform.api_key_env {
            if env.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "platform.api_key_env",
                    reason: "empty value".to_string(),
                }
                .into());
            }
        }

        if let Some(snapshot) = &self.platform.snapshot {
            if snapshot.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "platform.snapshot",
                    reason: "empty path".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Environment variable the API key is read from.
    pub fn api_key_env(&self) -> &str {
        self.platform
            .api_key_env
            .as_deref()
            .unwrap_or(constants::DEFAULT_API_KEY_ENV)
    }

    /// Read the API key from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingApiKey` if the variable is unset or blank.
    pub fn api_key(&self) -> Result<Zeroizing<String>> {
        let name = self.api_key_env();
        match std::env::var(name) {
            Ok(key) if !key.trim().is_empty() => Ok(Zeroizing::new(key.trim().to_string())),
            _ => Err(ConfigError::MissingApiKey(name.to_string()).into()),
        }
    }

    /// Spreading options from the `[spread]` section.
    pub fn spread_options(&self) -> SpreadOptions {
        SpreadOptions {
            resume_partial: self.spread.resume_partial,
        }
    }
}
