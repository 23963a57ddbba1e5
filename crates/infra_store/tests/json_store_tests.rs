//! Integration tests for the JSON-file project store.

use infra_store::{JsonFileProjectStore, ProjectStore, StoreError};
use quote_core::{ParameterSet, Position, ProjectDraft, ProjectId, SelectionList};

fn draft(name: &str) -> ProjectDraft {
    let mut roster = SelectionList::new();
    roster.add(Position::new("Welder", 4000.0, Some(250.0)), 3);
    roster.add(Position::new("Welder", 4000.0, Some(250.0)), 1);
    ProjectDraft {
        name: name.into(),
        client: "Acme".into(),
        reference: "Q-2024-001".into(),
        params: ParameterSet::default(),
        positions: roster.into_lines(),
    }
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_missing_file_is_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileProjectStore::new(dir.path().join("projects.json"));

    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_projects_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data/projects.json");

    let mut store = JsonFileProjectStore::new(&path);
    let first = store.save(draft("Shutdown 2024")).unwrap();
    let second = store.save(draft("Turnaround 2025")).unwrap();
    assert_ne!(first.id, second.id);

    let reopened = JsonFileProjectStore::new(&path);
    let projects = reopened.list().unwrap();
    assert_eq!(projects, vec![second.clone(), first.clone()]);
    assert_eq!(projects[1].positions.len(), 2);
    assert_eq!(reopened.get(&first.id).unwrap(), Some(first));
    assert_eq!(reopened.get(&ProjectId::new("missing")).unwrap(), None);
}

#[test]
fn test_delete() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileProjectStore::new(dir.path().join("projects.json"));
    let saved = store.save(draft("Scratch")).unwrap();

    assert!(store.delete(&saved.id).unwrap());
    assert!(!store.delete(&saved.id).unwrap());
    assert!(store.list().unwrap().is_empty());
}

// ============================================================================
// Failure Modes
// ============================================================================

#[test]
fn test_corrupt_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");
    std::fs::write(&path, "{not json").unwrap();

    let store = JsonFileProjectStore::new(&path);

    assert!(matches!(store.list(), Err(StoreError::Corrupt { .. })));
}

#[test]
fn test_non_finite_parameters_are_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");
    let mut store = JsonFileProjectStore::new(&path);
    let kept = store.save(draft("Shutdown 2024")).unwrap();

    let mut bad = draft("Broken");
    bad.params.margin = f64::NAN;
    let err = store.save(bad).unwrap_err();

    assert!(matches!(&err, StoreError::NonFinite { fields } if fields == &["margin".to_string()]));
    assert_eq!(store.list().unwrap(), vec![kept]);
}

#[test]
fn test_write_failure_names_temporary_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");
    // A directory in the way of the temporary file makes the write fail
    std::fs::create_dir(path.with_extension("json.tmp")).unwrap();

    let mut store = JsonFileProjectStore::new(&path);

    match store.save(draft("Shutdown 2024")) {
        Err(StoreError::Io { path: reported, .. }) => assert_eq!(reported, path.with_extension("json.tmp")),
        other => panic!("expected Io error, got {other:?}"),
    }
    assert!(!path.exists());
}
