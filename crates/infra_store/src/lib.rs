//! # Infra Store (Infra Layer)
//!
//! Persistence for saved quotation projects.
//!
//! A store stamps each submitted [`ProjectDraft`] with a fresh id and the
//! current time and keeps projects newest first. Two implementations are
//! provided:
//! - [`InMemoryProjectStore`]: process-local, for tests and one-shot runs
//! - [`JsonFileProjectStore`]: the whole list in one JSON file
//!
//! [`ProjectDraft`]: quote_core::ProjectDraft

#![deny(missing_docs)]

pub mod error;
pub mod json_file;
pub mod memory;

use quote_core::{ParameterError, ProjectDraft, ProjectId, SavedProject};

pub use error::{StoreError, StoreResult};
pub use json_file::JsonFileProjectStore;
pub use memory::InMemoryProjectStore;

/// Storage for saved projects.
pub trait ProjectStore {
    /// Saves a draft as a new project and returns it with its id and
    /// timestamp.
    fn save(&mut self, draft: ProjectDraft) -> StoreResult<SavedProject>;

    /// All projects, newest first.
    fn list(&self) -> StoreResult<Vec<SavedProject>>;

    /// Looks a project up by id.
    fn get(&self, id: &ProjectId) -> StoreResult<Option<SavedProject>> {
        Ok(self.list()?.into_iter().find(|p| &p.id == id))
    }

    /// Deletes a project. Returns `true` when it existed.
    fn delete(&mut self, id: &ProjectId) -> StoreResult<bool>;
}

/// Names every NaN or infinite number of a draft. JSON has no encoding for
/// them, so a stored project holding one could not be read back.
fn non_finite_fields(draft: &ProjectDraft) -> Vec<String> {
    let mut fields: Vec<String> = draft
        .params
        .validate()
        .into_iter()
        .filter_map(|problem| match problem {
            ParameterError::NotFinite { field } => Some(field.to_string()),
            _ => None,
        })
        .collect();
    if !draft.params.working_days.is_finite() {
        fields.push("working_days".to_string());
    }
    for line in &draft.positions {
        let position = &line.position;
        if !position.base_salary.is_finite() || position.specific_tool_cost.is_some_and(|c| !c.is_finite()) {
            fields.push(format!("position '{}'", position.name));
        }
    }
    fields
}

/// Checks and stamps a draft for storage.
pub(crate) fn stamp(draft: ProjectDraft) -> StoreResult<SavedProject> {
    let fields = non_finite_fields(&draft);
    if !fields.is_empty() {
        return Err(StoreError::NonFinite { fields });
    }
    Ok(SavedProject::from_draft(draft, ProjectId::generate(), chrono::Utc::now()))
}
