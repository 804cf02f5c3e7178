//! File-backed platform.
//!
//! Reads a JSON [`SpaceSnapshot`] from disk and writes it back after every
//! successful create or update, so a run that fails halfway leaves the file
//! with everything persisted up to that point.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{InMemory, Platform, SpaceSnapshot};
use crate::core::domain::{
    DeploymentProcess, LibraryVariableSet, NamedResource, Project, Variable, VariableCollection,
};
use crate::error::{PlatformError, Result};

/// A space stored as a JSON file.
#[derive(Debug)]
pub struct SnapshotFile {
    path: PathBuf,
    inner: InMemory,
}

impl SnapshotFile {
    /// Load a snapshot from `path`.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::SnapshotIo` if the file cannot be read, or
    /// `PlatformError::Json` if it is not a valid snapshot.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        debug!(path = %path.display(), "loading snapshot");

        let contents = fs::read_to_string(&path).map_err(|source| PlatformError::SnapshotIo {
            path: path.display().to_string(),
            source,
        })?;
        let mut space: SpaceSnapshot =
            serde_json::from_str(&contents).map_err(PlatformError::Json)?;

        // updates find variables by id
        let assigned = space.assign_missing_ids();
        if assigned > 0 {
            debug!(assigned, "gave ids to variables without one");
        }

        debug!(
            projects = space.projects.len(),
            library_variable_sets = space.library_variable_sets.len(),
            variable_sets = space.variable_sets.len(),
            "snapshot loaded"
        );

        Ok(Self {
            path,
            inner: InMemory::new(space),
        })
    }

    /// Write a snapshot to `path`, replacing any existing file.
    pub fn write(path: &Path, space: &SpaceSnapshot) -> Result<()> {
        let contents = serde_json::to_string_pretty(space).map_err(PlatformError::Json)?;
        fs::write(path, contents).map_err(|source| PlatformError::SnapshotIo {
            path: path.display().to_string(),
            source,
        })?;
        Ok(())
    }

    pub fn space(&self) -> &SpaceSnapshot {
        self.inner.space()
    }

    fn flush(&self) -> Result<()> {
        Self::write(&self.path, self.inner.space())
    }
}

impl Platform for SnapshotFile {
    fn projects(&self) -> Result<Vec<Project>> {
        self.inner.projects()
    }

    fn library_variable_sets(&self) -> Result<Vec<LibraryVariableSet>> {
        self.inner.library_variable_sets()
    }

    fn variable_set(&self, variable_set_id: &str) -> Result<VariableCollection> {
        self.inner.variable_set(variable_set_id)
    }

    fn create_variable(&mut self, owner_id: &str, variable: &Variable) -> Result<Variable> {
        let created = self.inner.create_variable(owner_id, variable)?;
        self.flush()?;
        Ok(created)
    }

    fn update_variable(&mut self, owner_id: &str, variable: &Variable) -> Result<Variable> {
        let updated = self.inner.update_variable(owner_id, variable)?;
        self.flush()?;
        Ok(updated)
    }

    fn environment(&self, id: &str) -> Result<NamedResource> {
        self.inner.environment(id)
    }

    fn machine(&self, id: &str) -> Result<NamedResource> {
        self.inner.machine(id)
    }

    fn channel(&self, id: &str) -> Result<NamedResource> {
        self.inner.channel(id)
    }

    fn runbook(&self, id: &str) -> Result<NamedResource> {
        self.inner.runbook(id)
    }

    fn project(&self, id: &str) -> Result<Project> {
        self.inner.project(id)
    }

    fn deployment_process(&self, id: &str) -> Result<DeploymentProcess> {
        self.inner.deployment_process(id)
    }
}
