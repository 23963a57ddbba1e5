//! Integration tests for saved projects and the roster they carry.

use chrono::{TimeZone, Utc};
use quote_core::{
    ParameterSet, Position, PositionCatalog, PreSelection, ProjectDraft, ProjectId, SavedProject, SelectionList,
    Toggle,
};

fn sample_roster() -> SelectionList {
    let mut roster = SelectionList::new();
    roster.add(Position::new("Welder", 4200.0, Some(350.0)), 2);
    roster.add(Position::new("Welder", 4200.0, Some(350.0)), 1);
    roster.add(Position::new("Driver", 2500.0, None), 3);
    roster
}

// ============================================================================
// Saved Project Shape
// ============================================================================

#[test]
fn test_saved_project_json_round_trip() {
    let mut params = ParameterSet::default();
    params.hra = Toggle::on(1200.0);
    let draft = ProjectDraft {
        name: "Shutdown 2024".into(),
        client: "Acme".into(),
        reference: "Q-2024-001".into(),
        params,
        positions: sample_roster().into_lines(),
    };
    let stamp = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();

    let project = SavedProject::from_draft(draft, ProjectId::new("p-1"), stamp);
    let json = serde_json::to_string(&project).unwrap();
    let back: SavedProject = serde_json::from_str(&json).unwrap();

    assert_eq!(back, project);
    assert_eq!(back.id.as_str(), "p-1");
    assert_eq!(back.positions.len(), 3);
}

#[test]
fn test_parameter_set_fills_missing_fields() {
    let params: ParameterSet = serde_json::from_str(r#"{"duration": 6.0, "margin": 12.0}"#).unwrap();

    assert_eq!(params.duration, 6.0);
    assert_eq!(params.margin, 12.0);
    assert_eq!(params.working_days, ParameterSet::default().working_days);
}

// ============================================================================
// Roster
// ============================================================================

#[test]
fn test_restored_roster_continues_ids() {
    let lines = sample_roster().into_lines();
    let highest = lines.iter().map(|l| l.selection_id).max().unwrap();

    let mut restored = SelectionList::from_lines(lines);
    let fresh = restored.add(Position::new("Rigger", 3000.0, None), 1);

    assert!(fresh > highest);
    assert_eq!(restored.total_headcount(), 7);
}

#[test]
fn test_materialize_drops_unknown_positions() {
    let mut catalog = PositionCatalog::new();
    let welder = catalog.add(Position::new("Welder", 4200.0, None));
    let unknown = Position::new("Ghost", 1.0, None).id;

    let mut roster = SelectionList::new();
    let added = roster.materialize(
        &[
            PreSelection {
                position_id: welder,
                qty: 2,
            },
            PreSelection {
                position_id: unknown,
                qty: 5,
            },
        ],
        &catalog,
    );

    assert_eq!(added, 1);
    assert_eq!(roster.total_headcount(), 2);
    assert_eq!(roster.as_slice()[0].name(), "Welder");
}
