//! Scope id to display name resolution.
//!
//! Names are looked up lazily through the [`Platform`] and memoized in a
//! [`NameCache`]. A cache belongs to one collection's spreading pass; it is
//! created by the caller and handed in, never shared between collections.

use std::collections::HashMap;

use tracing::trace;

use crate::core::constants::RUNBOOK_ID_PREFIX;
use crate::core::domain::ScopeDimension;
use crate::core::platform::Platform;
use crate::error::{Error, PlatformError, ResolveError};

/// Display names already looked up during one pass.
#[derive(Debug, Default)]
pub struct NameCache {
    names: HashMap<(ScopeDimension, String), String>,
    /// Projects whose deployment process actions are already in `names`.
    loaded_processes: Vec<String>,
}

impl NameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, dimension: ScopeDimension, id: &str) -> Option<&str> {
        self.names
            .get(&(dimension, id.to_string()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn insert(&mut self, dimension: ScopeDimension, id: &str, name: String) {
        self.names.insert((dimension, id.to_string()), name);
    }
}

/// Resolves scope ids for the variables of one owner.
pub struct Resolver<'a, P: Platform + ?Sized> {
    platform: &'a P,
    cache: &'a mut NameCache,
    owner_id: &'a str,
}

impl<'a, P: Platform + ?Sized> Resolver<'a, P> {
    /// `owner_id` is the project or library variable set whose collection is
    /// being named; action scopes are looked up in that project's process.
    pub fn new(platform: &'a P, cache: &'a mut NameCache, owner_id: &'a str) -> Self {
        Self {
            platform,
            cache,
            owner_id,
        }
    }

    /// Display name for one scope entry.
    ///
    /// Roles and tenant tags are returned as-is.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::ResourceNotFound` if the id no longer exists or
    /// names a blank resource, `ResolveError::ActionNotFound` if an action is
    /// not part of the owner's deployment process, and `ResolveError::Lookup`
    /// if the platform request itself failed.
    pub fn resolve(&mut self, dimension: ScopeDimension, id: &str) -> Result<String, ResolveError> {
        if let Some(name) = self.cache.get(dimension, id) {
            return Ok(name.to_string());
        }

        let found = match dimension {
            ScopeDimension::Roles | ScopeDimension::TenantTags => return Ok(id.trim().to_string()),
            ScopeDimension::Actions => return self.action_name(id),
            ScopeDimension::Environments => self.platform.environment(id).map(|r| r.name),
            ScopeDimension::Machines => self.platform.machine(id).map(|r| r.name),
            ScopeDimension::Channels => self.platform.channel(id).map(|r| r.name),
            ScopeDimension::ProcessOwners if id.starts_with(RUNBOOK_ID_PREFIX) => {
                self.platform.runbook(id).map(|r| r.name)
            }
            ScopeDimension::ProcessOwners => self.platform.project(id).map(|p| p.name),
        };

        let name = found
            .map_err(|e| lookup_error(dimension, id, e))?
            .trim()
            .to_string();
        if name.is_empty() {
            return Err(ResolveError::ResourceNotFound {
                dimension,
                id: id.to_string(),
            });
        }

        trace!(%dimension, id, name = %name, "resolved scope name");
        self.cache.insert(dimension, id, name.clone());
        Ok(name)
    }

    /// Actions only exist inside a project's deployment process, so the whole
    /// process of the owning project is loaded into the cache on first use.
    fn action_name(&mut self, id: &str) -> Result<String, ResolveError> {
        let owner = self.owner_id.to_string();
        if !self.cache.loaded_processes.contains(&owner) {
            let project = self
                .platform
                .project(&owner)
                .map_err(|e| lookup_error(ScopeDimension::Actions, id, e))?;

            if let Some(process_id) = project.deployment_process_id.as_deref() {
                let process = self
                    .platform
                    .deployment_process(process_id)
                    .map_err(|e| lookup_error(ScopeDimension::Actions, id, e))?;
                for action in process.actions() {
                    let name = action.name.trim();
                    if !name.is_empty() {
                        self.cache
                            .insert(ScopeDimension::Actions, &action.id, name.to_string());
                    }
                }
            }
            self.cache.loaded_processes.push(owner.clone());
        }

        self.cache
            .get(ScopeDimension::Actions, id)
            .map(str::to_string)
            .ok_or(ResolveError::ActionNotFound {
                action: id.to_string(),
                project: owner,
            })
    }
}

fn lookup_error(dimension: ScopeDimension, id: &str, err: Error) -> ResolveError {
    match err {
        Error::Platform(PlatformError::NotFound { .. }) => ResolveError::ResourceNotFound {
            dimension,
            id: id.to_string(),
        },
        other => ResolveError::Lookup {
            dimension,
            id: id.to_string(),
            source: Box::new(other),
        },
    }
}
