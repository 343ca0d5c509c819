//! Eraser (multi-delete selection).

use super::*;

fn erase(h: &mut Harness, from: (f64, f64), to: (f64, f64)) {
    h.tool(Tool::MultiDeleteSelect);
    h.down(from.0, from.1);
    h.mv((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
    h.mv(to.0, to.1);
    h.up(to.0, to.1);
}

#[test]
fn test_eraser_deletes_enclosed_regions() {
    let mut h = Harness::new(sheet_with(vec![
        point("a", 0.1, 0.1),
        point("b", 0.2, 0.2),
        point("c", 0.3, 0.3),
        point("d", 0.7, 0.7),
        point("e", 0.9, 0.1),
    ]));

    erase(&mut h, (0.05, 0.05), (0.35, 0.35));

    let left: Vec<&str> = h.regions().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(left, vec!["d", "e"]);
    assert_eq!(h.history_names(), vec!["Eraser Tool: Deleted 3 regions"]);
    assert_eq!(h.state.mode, None);

    h.dispatch(Action::RestoreHistory);
    assert_eq!(h.regions().len(), 5);
    assert_eq!(h.state.mode, None);
}

#[test]
fn test_eraser_tracks_selection_rectangle() {
    let mut h = Harness::new(blank_sheet());
    h.tool(Tool::MultiDeleteSelect);
    h.down(0.6, 0.6);
    h.mv(0.2, 0.3);

    let rect = h
        .state
        .mode
        .as_ref()
        .and_then(|m| m.selection_rect())
        .expect("selecting");
    assert_close(rect.x, 0.2);
    assert_close(rect.y, 0.3);
    assert_close(rect.w, 0.4);
    assert_close(rect.h, 0.3);
}

#[test]
fn test_eraser_requires_full_containment() {
    let mut h = Harness::new(sheet_with(vec![
        bbox("inside", 0.1, 0.1, 0.1, 0.1),
        bbox("straddling", 0.3, 0.3, 0.3, 0.3),
        line("crossing", 0.1, 0.4, 0.8, 0.4),
    ]));

    erase(&mut h, (0.0, 0.0), (0.5, 0.5));

    let left: Vec<&str> = h.regions().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(left, vec!["straddling", "crossing"]);
    assert_eq!(h.history_names(), vec!["Eraser Tool: Deleted 1 regions"]);
}

#[test]
fn test_eraser_skips_hidden_scale_and_dimmed() {
    let mut hidden = point("hidden", 0.1, 0.1);
    hidden.visible = false;
    let dimmed = point("dimmed", 0.2, 0.2).with_category("Piping");
    let mut state = sheet_with(vec![
        hidden,
        dimmed,
        scale("scale", 0.1, 0.3, 0.2, 0.3, "10"),
        point("gone", 0.3, 0.3),
    ]);
    state.dimmed_categories.insert("Piping".to_string());
    let mut h = Harness::new(state);

    erase(&mut h, (0.0, 0.0), (0.5, 0.5));

    let left: Vec<&str> = h.regions().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(left, vec!["hidden", "dimmed", "scale"]);
}

#[test]
fn test_empty_selection_records_nothing() {
    let mut h = Harness::new(sheet_with(vec![point("far", 0.9, 0.9)]));
    erase(&mut h, (0.0, 0.0), (0.2, 0.2));

    assert_eq!(h.regions().len(), 1);
    assert!(h.state.history.is_empty());
    assert_eq!(h.state.mode, None);
}

#[test]
fn test_eraser_only_touches_active_image() {
    let mut state = sheet_with(vec![point("here", 0.1, 0.1)]);
    state.images.push(
        Image::new("sheet-2.png", "Sheet 2").with_regions(vec![point("there", 0.1, 0.1)]),
    );
    let mut h = Harness::new(state);

    erase(&mut h, (0.0, 0.0), (0.5, 0.5));

    assert!(h.regions().is_empty());
    assert_eq!(h.state.images[1].regions.len(), 1);
}

#[test]
fn test_eraser_updates_measurements() {
    let mut h = Harness::new(sheet_with(vec![
        scale("s1", 0.6, 0.6, 0.7, 0.6, "10"),
        line("l1", 0.6, 0.8, 0.65, 0.8),
        point("p1", 0.1, 0.1),
    ]));
    h.dispatch(Action::ImageLoaded {
        width: 1000,
        height: 1000,
    });
    assert_close(length_ft(h.region("l1")).expect("measured"), 5.0);

    erase(&mut h, (0.0, 0.0), (0.2, 0.2));
    assert_close(length_ft(h.region("l1")).expect("measured"), 5.0);
}
