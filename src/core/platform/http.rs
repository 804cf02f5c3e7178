//! REST API platform backend.
//!
//! Talks to a live server over HTTP. Enable with `--features http`.
//!
//! ## Usage
//!
//! ```toml
//! [platform]
//! server = "https://deploy.example.com"
//! space = "Spaces-1"
//! api_key_env = "OCTOPUS_API_KEY"
//! ```
//!
//! The platform has no endpoint for adding a single variable: creates and
//! updates fetch the owner's whole variable set, change it, and PUT it back.
//! Sensitive variables travel with a `null` value, which the server treats as
//! "keep the stored secret".

use std::collections::HashSet;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::Platform;
use crate::core::constants::API_KEY_HEADER;
use crate::core::domain::{
    DeploymentProcess, LibraryVariableSet, NamedResource, Project, Variable, VariableCollection,
};
use crate::error::{PlatformError, Result};

/// A platform space reached over its REST API.
pub struct Http {
    client: Client,
    base: String,
    api_key: Zeroizing<String>,
}

impl std::fmt::Debug for Http {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Http")
            .field("base", &self.base)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl Http {
    /// Connect to `server`, scoping every request to `space`.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Transport` if the HTTP client cannot be built.
    pub fn new(server: &str, space: &str, api_key: Zeroizing<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("scopespread/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PlatformError::Transport(e.to_string()))?;
        let base = format!(
            "{}/api/{}",
            server.trim().trim_end_matches('/'),
            space.trim()
        );
        debug!(base = %base, "http platform ready");
        Ok(Self {
            client,
            base,
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    fn get<T: DeserializeOwned>(&self, kind: &'static str, id: &str, path: &str) -> Result<T> {
        let url = self.url(path);
        trace!(url = %url, "GET");
        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .send()
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(PlatformError::NotFound {
                kind,
                id: id.to_string(),
            }
            .into());
        }
        decode(check(response, &url)?)
    }

    fn put_set(
        &self,
        operation: &'static str,
        owner_id: &str,
        variable: &Variable,
        set: &VariableCollection,
    ) -> Result<VariableCollection> {
        let url = self.url(&format!("variables/{}", set.id));
        trace!(url = %url, "PUT");
        let response = self
            .client
            .put(&url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(set)
            .send()
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(PlatformError::Rejected {
                operation,
                owner: owner_id.to_string(),
                variable: variable.name.clone(),
                reason: format!("{}: {}", status, body.trim()),
            }
            .into());
        }
        decode(response)
    }

    /// The variable set owned by a project or library variable set.
    fn owned_set(&self, owner_id: &str) -> Result<VariableCollection> {
        let variable_set_id = if owner_id.starts_with("LibraryVariableSets-") {
            self.get::<LibraryVariableSet>(
                "library variable set",
                owner_id,
                &format!("libraryvariablesets/{}", owner_id),
            )?
            .variable_set_id
        } else {
            self.project(owner_id)?.variable_set_id
        };
        self.variable_set(&variable_set_id)
    }
}

fn check(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(PlatformError::Transport(format!("{} returned {}: {}", url, status, body.trim())).into())
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response
        .bytes()
        .map_err(|e| PlatformError::Transport(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| PlatformError::Json(e).into())
}

fn missing_from_response(
    operation: &'static str,
    owner_id: &str,
    variable: &Variable,
) -> crate::error::Error {
    PlatformError::Rejected {
        operation,
        owner: owner_id.to_string(),
        variable: variable.name.clone(),
        reason: "variable missing from the saved variable set".to_string(),
    }
    .into()
}

impl Platform for Http {
    fn projects(&self) -> Result<Vec<Project>> {
        self.get("projects", "all", "projects/all")
    }

    fn library_variable_sets(&self) -> Result<Vec<LibraryVariableSet>> {
        self.get("library variable sets", "all", "libraryvariablesets/all")
    }

    fn variable_set(&self, variable_set_id: &str) -> Result<VariableCollection> {
        self.get(
            "variable set",
            variable_set_id,
            &format!("variables/{}", variable_set_id),
        )
    }

    fn create_variable(&mut self, owner_id: &str, variable: &Variable) -> Result<Variable> {
        let mut set = self.owned_set(owner_id)?;
        let existing: HashSet<String> = set.variables.iter().map(|v| v.id.clone()).collect();

        let mut fresh = variable.clone();
        fresh.id.clear();
        set.variables.push(fresh);

        let saved = self.put_set("create", owner_id, variable, &set)?;
        saved
            .variables
            .into_iter()
            .find(|v| {
                !existing.contains(&v.id) && v.name == variable.name && v.scope == variable.scope
            })
            .ok_or_else(|| missing_from_response("create", owner_id, variable))
    }

    fn update_variable(&mut self, owner_id: &str, variable: &Variable) -> Result<Variable> {
        let mut set = self.owned_set(owner_id)?;
        let slot = set
            .variables
            .iter_mut()
            .find(|v| v.id == variable.id)
            .ok_or_else(|| missing_from_response("update", owner_id, variable))?;
        *slot = variable.clone();

        let saved = self.put_set("update", owner_id, variable, &set)?;
        saved
            .variables
            .into_iter()
            .find(|v| v.id == variable.id)
            .ok_or_else(|| missing_from_response("update", owner_id, variable))
    }

    fn environment(&self, id: &str) -> Result<NamedResource> {
        self.get("environment", id, &format!("environments/{}", id))
    }

    fn machine(&self, id: &str) -> Result<NamedResource> {
        self.get("machine", id, &format!("machines/{}", id))
    }

    fn channel(&self, id: &str) -> Result<NamedResource> {
        self.get("channel", id, &format!("channels/{}", id))
    }

    fn runbook(&self, id: &str) -> Result<NamedResource> {
        self.get("runbook", id, &format!("runbooks/{}", id))
    }

    fn project(&self, id: &str) -> Result<Project> {
        self.get("project", id, &format!("projects/{}", id))
    }

    fn deployment_process(&self, id: &str) -> Result<DeploymentProcess> {
        self.get(
            "deployment process",
            id,
            &format!("deploymentprocesses/{}", id),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let http = Http::new(
            " https://deploy.example.com/ ",
            "Spaces-1",
            Zeroizing::new("API-KEY".to_string()),
        )
        .unwrap();
        assert_eq!(
            http.url("projects/all"),
            "https://deploy.example.com/api/Spaces-1/projects/all"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let http = Http::new(
            "https://deploy.example.com",
            "Spaces-1",
            Zeroizing::new("API-SECRET".to_string()),
        )
        .unwrap();
        assert!(!format!("{:?}", http).contains("API-SECRET"));
    }
}
