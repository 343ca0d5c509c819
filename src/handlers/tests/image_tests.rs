//! Image switching and loading.

use super::*;

fn two_sheets() -> AnnotationState {
    let mut state = sheet_with(vec![point("a", 0.1, 0.1)]);
    state.images.push(
        Image::new("sheet-2.png", "Sheet 2").with_regions(vec![
            scale("s1", 0.0, 0.0, 0.2, 0.0, "10"),
            line("l1", 0.1, 0.5, 0.5, 0.5),
        ]),
    );
    state
}

#[test]
fn test_select_image() {
    let mut h = Harness::new(two_sheets());
    h.dispatch(Action::SelectImage { index: 1 });

    assert_eq!(h.state.selected_image, Some(1));
    assert!(h.state.region("s1").is_some());
    assert!(h.state.region("a").is_none());
    assert!(h.state.history.is_empty());
}

#[test]
fn test_select_image_out_of_range_is_ignored() {
    let mut h = Harness::new(two_sheets());
    let before = h.state.clone();
    h.dispatch(Action::SelectImage { index: 7 });
    assert_eq!(h.state, before);
}

#[test]
fn test_switching_image_discards_region_in_progress() {
    let mut h = Harness::new(two_sheets());
    h.tool(Tool::CreatePolygon);
    h.click(0.5, 0.5);
    h.mv(0.6, 0.5);
    assert!(h.state.region("id1").is_some());

    h.dispatch(Action::SelectImage { index: 1 });

    assert_eq!(h.state.mode, None);
    assert!(h.state.images[0].region("id1").is_none());
    assert!(h.state.history.is_empty());
}

#[test]
fn test_image_loaded_measures_lines() {
    let mut h = Harness::new(two_sheets());
    h.dispatch(Action::SelectImage { index: 1 });
    assert_eq!(length_ft(h.region("l1")), None);

    // 200 px for 10 ft on the scale, 400 px on the line.
    h.dispatch(Action::ImageLoaded {
        width: 1000,
        height: 2000,
    });

    let image = h.state.active_image().expect("image");
    assert_eq!(image.pixel_size.map(|p| (p.w, p.h)), Some((1000, 2000)));
    assert_close(length_ft(h.region("l1")).expect("measured"), 20.0);
}
