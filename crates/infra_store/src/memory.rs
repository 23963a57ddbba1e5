//! In-memory project store.

use quote_core::{ProjectDraft, ProjectId, SavedProject};
use tracing::debug;

use crate::{stamp, ProjectStore, StoreResult};

/// Process-local project store.
#[derive(Clone, Debug, Default)]
pub struct InMemoryProjectStore {
    projects: Vec<SavedProject>,
}

impl InMemoryProjectStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored projects.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl ProjectStore for InMemoryProjectStore {
    fn save(&mut self, draft: ProjectDraft) -> StoreResult<SavedProject> {
        let project = stamp(draft)?;
        debug!(id = %project.id, name = %project.name, "Project saved in memory");
        self.projects.insert(0, project.clone());
        Ok(project)
    }

    fn list(&self) -> StoreResult<Vec<SavedProject>> {
        Ok(self.projects.clone())
    }

    fn get(&self, id: &ProjectId) -> StoreResult<Option<SavedProject>> {
        Ok(self.projects.iter().find(|p| &p.id == id).cloned())
    }

    fn delete(&mut self, id: &ProjectId) -> StoreResult<bool> {
        let before = self.projects.len();
        self.projects.retain(|p| &p.id != id);
        Ok(self.projects.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreError;
    use quote_core::ParameterSet;

    fn draft(name: &str) -> ProjectDraft {
        ProjectDraft {
            name: name.into(),
            client: "Acme".into(),
            reference: "Q-1".into(),
            params: ParameterSet::default(),
            positions: Vec::new(),
        }
    }

    #[test]
    fn test_newest_first() {
        let mut store = InMemoryProjectStore::new();
        store.save(draft("first")).unwrap();
        store.save(draft("second")).unwrap();

        let names: Vec<_> = store.list().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["second", "first"]);
    }

    #[test]
    fn test_get_and_delete() {
        let mut store = InMemoryProjectStore::new();
        let saved = store.save(draft("only")).unwrap();

        assert_eq!(store.get(&saved.id).unwrap(), Some(saved.clone()));
        assert!(store.delete(&saved.id).unwrap());
        assert!(!store.delete(&saved.id).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_non_finite_draft_rejected() {
        let mut store = InMemoryProjectStore::new();
        let mut bad = draft("bad");
        bad.params.margin = f64::NAN;
        bad.params.sub_con.manpower = f64::INFINITY;

        match store.save(bad) {
            Err(StoreError::NonFinite { fields }) => {
                assert!(fields.contains(&"margin".to_string()));
                assert!(fields.contains(&"sub_con.manpower".to_string()));
            }
            other => panic!("expected NonFinite, got {other:?}"),
        }
        assert!(store.is_empty());
    }
}
