//! Breakout grouping and visibility.

use super::*;
use crate::model::Breakout;

fn grouped_sheet() -> AnnotationState {
    let mut state = sheet_with(vec![
        point("a", 0.1, 0.1).with_breakout("bo1"),
        point("b", 0.2, 0.2).with_breakout("bo2"),
        point("c", 0.3, 0.3),
    ]);
    state.breakouts = vec![Breakout::new("bo1", "Unit 1"), Breakout::new("bo2", "Unit 2")];
    state
}

fn toggle(h: &mut Harness, id: &str) {
    h.dispatch(Action::ToggleBreakoutVisibility {
        breakout_id: id.to_string(),
    });
}

fn visible_ids(h: &Harness) -> Vec<&str> {
    h.regions()
        .iter()
        .filter(|r| r.visible)
        .map(|r| r.id.as_str())
        .collect()
}

#[test]
fn test_toggle_shows_one_breakout() {
    let mut h = Harness::new(grouped_sheet());
    toggle(&mut h, "bo1");

    assert_eq!(visible_ids(&h), vec!["a", "c"]);
    assert_eq!(h.state.selected_breakout_toggle.as_deref(), Some("bo1"));
    assert!(h.state.breakout("bo1").is_some_and(|b| b.visible));

    toggle(&mut h, "bo2");
    assert_eq!(visible_ids(&h), vec!["b", "c"]);
    assert!(h.state.breakout("bo1").is_some_and(|b| !b.visible));
    assert_eq!(h.state.selected_breakout_toggle.as_deref(), Some("bo2"));
}

#[test]
fn test_toggling_off_restores_everything() {
    let mut state = grouped_sheet();
    state.images[0].regions[2].visible = false;
    let mut h = Harness::new(state);

    toggle(&mut h, "bo1");
    toggle(&mut h, "bo1");

    assert_eq!(visible_ids(&h), vec!["a", "b", "c"]);
    assert_eq!(h.state.selected_breakout_toggle, None);
    assert!(h.state.breakouts.iter().all(|b| !b.visible));
}

#[test]
fn test_toggle_unknown_breakout_is_ignored() {
    let mut h = Harness::new(grouped_sheet());
    let before = h.state.clone();
    toggle(&mut h, "nope");
    assert_eq!(h.state, before);
}

#[test]
fn test_add_breakout_with_region() {
    let mut h = Harness::new(grouped_sheet());
    h.dispatch(Action::AddNewBreakout {
        name: "Unit 3".to_string(),
        region: Some(point("c", 0.0, 0.0)),
    });

    let created = h.state.breakouts.last().expect("breakout");
    assert_eq!(created.name, "Unit 3");
    assert!(created.is_breakout);
    assert_eq!(h.region("c").breakout.as_deref(), Some(created.id.as_str()));

    let before = h.state.clone();
    h.dispatch(Action::AddNewBreakout {
        name: "Ghost".to_string(),
        region: Some(point("ghost", 0.0, 0.0)),
    });
    assert_eq!(h.state, before);
}

#[test]
fn test_breakout_by_category_spans_images() {
    let mut state = sheet_with(vec![
        point("a", 0.1, 0.1).with_category("Lighting"),
        point("b", 0.2, 0.2).with_category("Power"),
    ]);
    state.images.push(
        Image::new("sheet-2.png", "Sheet 2")
            .with_regions(vec![point("c", 0.1, 0.1).with_category("Lighting")]),
    );
    let mut h = Harness::new(state);

    h.dispatch(Action::AddNewBreakoutByCategory {
        category: "Lighting".to_string(),
    });

    let breakout = h.state.breakouts[0].clone();
    assert_eq!(breakout.name, "Lighting");
    let members: Vec<&str> = h
        .state
        .all_regions()
        .filter(|r| r.breakout.as_deref() == Some(breakout.id.as_str()))
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(members, vec!["a", "c"]);
}

#[test]
fn test_delete_breakout_releases_regions() {
    let mut state = grouped_sheet();
    state.pinned_breakout = Some("bo1".to_string());
    let mut h = Harness::new(state);
    toggle(&mut h, "bo2");
    assert!(!h.region("a").visible);

    h.dispatch(Action::DeleteBreakout {
        breakout_id: "bo1".to_string(),
    });

    assert!(h.state.breakout("bo1").is_none());
    assert_eq!(h.region("a").breakout, None);
    assert!(h.region("a").visible);
    assert_eq!(h.state.pinned_breakout, None);
    assert_eq!(h.state.selected_breakout_toggle.as_deref(), Some("bo2"));
}

#[test]
fn test_assign_and_rename() {
    let mut h = Harness::new(grouped_sheet());
    h.dispatch(Action::AssignBreakout {
        region: point("c", 0.0, 0.0),
        breakout_id: Some("bo2".to_string()),
    });
    assert_eq!(h.region("c").breakout.as_deref(), Some("bo2"));

    h.dispatch(Action::AssignBreakout {
        region: point("c", 0.0, 0.0),
        breakout_id: Some("missing".to_string()),
    });
    assert_eq!(h.region("c").breakout.as_deref(), Some("bo2"));

    h.dispatch(Action::AssignBreakout {
        region: point("a", 0.0, 0.0),
        breakout_id: None,
    });
    assert_eq!(h.region("a").breakout, None);

    h.dispatch(Action::RenameBreakout {
        breakout_id: "bo2".to_string(),
        name: "North wing".to_string(),
    });
    assert_eq!(h.state.breakout("bo2").map(|b| b.name.as_str()), Some("North wing"));
}

#[test]
fn test_pinned_breakout_applies_to_new_regions() {
    let mut state = blank_sheet();
    state.breakouts.push(Breakout::new("bo1", "Unit 1"));
    let mut h = Harness::new(state);

    h.dispatch(Action::PinBreakout {
        breakout_id: Some("bo1".to_string()),
    });
    h.tool(Tool::CreatePoint);
    h.click(0.4, 0.4);

    assert_eq!(h.region("id1").breakout.as_deref(), Some("bo1"));

    h.dispatch(Action::PinBreakout {
        breakout_id: Some("missing".to_string()),
    });
    assert_eq!(h.state.pinned_breakout.as_deref(), Some("bo1"));

    h.dispatch(Action::PinBreakout { breakout_id: None });
    assert_eq!(h.state.pinned_breakout, None);
}
