//! JSON-file project store.
//!
//! The whole project list lives in one JSON array, newest first. Every
//! operation reads the file; writes replace it through a temporary file in
//! the same directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use quote_core::{ProjectDraft, ProjectId, SavedProject};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::{stamp, ProjectStore, StoreResult};

/// Project store backed by a single JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileProjectStore {
    path: PathBuf,
}

impl JsonFileProjectStore {
    /// Opens a store at `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_all(&self) -> StoreResult<Vec<SavedProject>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, projects: &[SavedProject]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(projects).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }
}

impl ProjectStore for JsonFileProjectStore {
    fn save(&mut self, draft: ProjectDraft) -> StoreResult<SavedProject> {
        let project = stamp(draft)?;
        let mut projects = self.read_all()?;
        projects.insert(0, project.clone());
        self.write_all(&projects)?;
        info!(id = %project.id, name = %project.name, path = %self.path.display(), "Project saved");
        Ok(project)
    }

    fn list(&self) -> StoreResult<Vec<SavedProject>> {
        let projects = self.read_all()?;
        debug!(count = projects.len(), path = %self.path.display(), "Projects loaded");
        Ok(projects)
    }

    fn delete(&mut self, id: &ProjectId) -> StoreResult<bool> {
        let mut projects = self.read_all()?;
        let before = projects.len();
        projects.retain(|p| &p.id != id);
        if projects.len() == before {
            return Ok(false);
        }
        self.write_all(&projects)?;
        info!(id = %id, "Project deleted");
        Ok(true)
    }
}
