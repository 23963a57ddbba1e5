//! Saved quotation projects.
//!
//! A [`SavedProject`] is the persisted shape of one quotation: its name,
//! client, reference, parameter snapshot and roster. Stores assign the id
//! and last-modified timestamp; callers hand them a [`ProjectDraft`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::params::ParameterSet;
use crate::selection::SelectedPosition;

/// Generated identifier of a saved project.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(String);

impl ProjectId {
    /// Creates a project ID from an existing identifier.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A project as submitted for saving.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectDraft {
    /// Display name
    pub name: String,
    /// Client identifier as chosen by the user
    pub client: String,
    /// Quotation reference string
    pub reference: String,
    /// Parameter snapshot
    pub params: ParameterSet,
    /// Roster lines
    pub positions: Vec<SelectedPosition>,
}

/// A persisted project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedProject {
    /// Generated identifier
    pub id: ProjectId,
    /// Display name
    pub name: String,
    /// Client identifier as chosen by the user
    pub client: String,
    /// Quotation reference string
    pub reference: String,
    /// Parameter snapshot
    pub params: ParameterSet,
    /// Roster lines
    pub positions: Vec<SelectedPosition>,
    /// Last modification time
    pub last_modified: DateTime<Utc>,
}

impl SavedProject {
    /// Stamps a draft with an identifier and timestamp.
    pub fn from_draft(draft: ProjectDraft, id: ProjectId, last_modified: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            client: draft.client,
            reference: draft.reference,
            params: draft.params,
            positions: draft.positions,
            last_modified,
        }
    }
}
