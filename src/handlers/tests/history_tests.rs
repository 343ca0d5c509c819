//! Undo through the full reducer.

use super::*;

fn populated() -> AnnotationState {
    sheet_with(vec![
        point("a", 0.1, 0.1),
        bbox("b", 0.4, 0.4, 0.1, 0.1),
        point("c", 0.8, 0.8),
    ])
}

#[test]
fn test_restores_are_last_in_first_out() {
    let initial = populated();
    let mut h = Harness::new(initial.clone());

    h.dispatch(Action::DeleteRegion {
        region: Some(point("a", 0.0, 0.0)),
    });
    h.tool(Tool::CreatePoint);
    h.click(0.5, 0.2);
    h.dispatch(Action::BeginMoveRegion {
        region: bbox("b", 0.0, 0.0, 0.0, 0.0),
    });
    h.mv(0.6, 0.6);
    h.up(0.6, 0.6);

    assert_eq!(
        h.history_names(),
        vec!["Move Region", "Create Point", "Delete Region"]
    );

    h.dispatch(Action::RestoreHistory);
    assert!(h.state.region("id1").is_some());
    assert_close(
        h.region("b").shape.bounding_rect().expect("box").x,
        0.4,
    );

    h.dispatch(Action::RestoreHistory);
    assert!(h.state.region("id1").is_none());
    assert!(h.state.region("a").is_none());

    h.dispatch(Action::RestoreHistory);
    assert!(h.state.history.is_empty());
    assert!(
        h.state.without_history().images == initial.images,
        "document should match the initial one"
    );
}

#[test]
fn test_restore_with_empty_history_keeps_state() {
    let mut h = Harness::new(populated());
    let before = h.state.clone();
    h.dispatch(Action::RestoreHistory);
    assert_eq!(h.state, before);
}

#[test]
fn test_history_is_capped() {
    let mut h = Harness::new(populated()).with_history_limit(2);
    for id in ["a", "b", "c"] {
        h.dispatch(Action::DeleteRegion {
            region: Some(point(id, 0.0, 0.0)),
        });
    }

    assert_eq!(h.state.history.len(), 2);
    assert!(h.regions().is_empty());

    h.dispatch(Action::RestoreHistory);
    h.dispatch(Action::RestoreHistory);
    let left: Vec<&str> = h.regions().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(left, vec!["b", "c"]);
    assert!(h.state.history.is_empty());
}

#[test]
fn test_snapshots_hold_no_history() {
    let mut h = Harness::new(populated());
    h.dispatch(Action::DeleteRegion {
        region: Some(point("a", 0.0, 0.0)),
    });
    h.dispatch(Action::DeleteRegion {
        region: Some(point("b", 0.0, 0.0)),
    });

    assert!(h.state.history.iter().all(|e| e.state.history.is_empty()));
    assert!(h.state.history[0].time > h.state.history[1].time);
}

#[test]
fn test_non_recorded_actions_leave_history_alone() {
    let mut h = Harness::new(populated());
    h.dispatch(Action::SelectRegion {
        region: point("a", 0.0, 0.0),
    });
    h.dispatch(Action::ToggleCategoryDimming {
        category: "Piping".to_string(),
    });
    h.dispatch(Action::Cancel);

    assert!(h.state.history.is_empty());
}
