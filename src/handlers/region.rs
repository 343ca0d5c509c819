//! Region selection, editing, deletion and the begin-* gestures.

use crate::constants::{MIN_POLYGON_VERTICES, NOT_CLASSIFIED};
use crate::history::save_to_history;
use crate::measurement::recompute_active_image;
use crate::mode::Mode;
use crate::model::{Region, Shape};
use crate::reducer::Env;
use crate::resolver;
use crate::state::AnnotationState;

use super::{apply_pinned_breakout, clear_highlights};

/// Highlight one region and open its label editor.
pub fn handle_select(state: &mut AnnotationState, region_id: &str) {
    if state.region(region_id).is_none() {
        log::warn!("Cannot select unknown region '{}'", region_id);
        return;
    }
    for region in state.active_regions_mut() {
        let selected = region.id == region_id;
        region.highlighted = selected;
        region.editing_labels = selected;
    }
    apply_pinned_breakout(state, region_id);
    log::debug!("👆 Selected '{}'", region_id);
}

/// Replace the editable fields of a region.
///
/// Category and color are never taken from the payload: they stay as they are
/// unless `cls` changed, in which case they are resolved from the device list.
/// At most one history entry is recorded, named after the first significant
/// change.
pub fn handle_change(state: &mut AnnotationState, payload: &Region, env: &mut Env<'_>) {
    let Some(old) = state.region(&payload.id).cloned() else {
        log::warn!("Cannot change unknown region '{}'", payload.id);
        return;
    };

    let mut next = payload.clone();
    next.category = old.category.clone();
    next.color = old.color.clone();
    if next == old {
        return;
    }

    let cls_changed = next.cls != old.cls;
    let history_name = if cls_changed {
        Some("Change Region Classification")
    } else if next.tags != old.tags {
        Some("Change Region Tags")
    } else if next.comment != old.comment {
        Some("Change Region Comment")
    } else {
        None
    };
    if let Some(name) = history_name {
        save_to_history(state, name, env);
    }

    let is_scale = next.is_scale();
    if cls_changed && !is_scale {
        if let Some(cls) = next.cls.clone() {
            resolver::register_device(state, env, &cls, NOT_CLASSIFIED);
            state.selected_cls = Some(cls);
        }
        resolver::apply_classification(state, &mut next);
    }

    let geometry_changed = next.shape != old.shape;
    if let Some(region) = state.region_mut(&payload.id) {
        *region = next;
    }

    if (is_scale && cls_changed) || (geometry_changed && (is_scale || old.is_line())) {
        recompute_active_image(state);
    }
    log::debug!("✏️ Changed region '{}'", payload.id);
}

/// Change the category of a region.
///
/// When the region's `cls` names a user-defined device the device moves to the
/// new category, and so does every region in the document that shared the
/// device's old category. The edited region always takes the new category.
pub fn handle_change_category(
    state: &mut AnnotationState,
    region_id: &str,
    category: &str,
    env: &mut Env<'_>,
) {
    let Some(region) = state.region(region_id).cloned() else {
        log::warn!("Cannot recategorize unknown region '{}'", region_id);
        return;
    };
    if region.category == category {
        return;
    }

    save_to_history(state, "Change Region Category", env);
    resolver::register_category(state, category, None);

    let device_wide = region
        .cls
        .as_deref()
        .is_some_and(|cls| state.device(cls).is_some_and(|d| d.user_defined));

    if device_wide {
        if let Some(cls) = region.cls.as_deref() {
            resolver::change_device_category(state, cls, category);
        }
    } else if region.cls.as_deref().is_some_and(|cls| state.device(cls).is_some()) {
        log::warn!(
            "Device of '{}' is built-in; changing the region's category only",
            region_id
        );
    }

    // The edited region follows even when its category had diverged from the device.
    let color = resolver::color_by_category(state, category);
    if let Some(region) = state.region_mut(region_id) {
        region.category = category.to_string();
        region.color = color;
    }
    log::debug!("🏷️ Region '{}' now in '{}'", region_id, category);
}

/// Delete one region of the active image.
pub fn handle_delete(state: &mut AnnotationState, region_id: &str) {
    let Some(region) = state.region(region_id) else {
        log::warn!("Cannot delete unknown region '{}'", region_id);
        return;
    };
    let was_scale = region.is_scale();

    if let Some(image) = state.active_image_mut() {
        image.regions.retain(|r| r.id != region_id);
    }
    drop_mode_for(state, &[region_id.to_string()]);
    if was_scale {
        recompute_active_image(state);
    }
    log::debug!("🗑️ Deleted region '{}'", region_id);
}

/// Delete every highlighted region of the active image.
pub fn handle_delete_highlighted(state: &mut AnnotationState) {
    let Some(image) = state.active_image() else {
        return;
    };
    let doomed: Vec<String> = image
        .regions
        .iter()
        .filter(|r| r.highlighted)
        .map(|r| r.id.clone())
        .collect();
    if doomed.is_empty() {
        return;
    }
    let had_scale = image
        .regions
        .iter()
        .any(|r| r.highlighted && r.is_scale());

    if let Some(image) = state.active_image_mut() {
        image.regions.retain(|r| !r.highlighted);
    }
    drop_mode_for(state, &doomed);
    if had_scale {
        recompute_active_image(state);
    }
    log::debug!("🗑️ Deleted {} highlighted regions", doomed.len());
}

/// Leave any mode that works on one of `region_ids`.
fn drop_mode_for(state: &mut AnnotationState, region_ids: &[String]) {
    let affected = state
        .mode
        .as_ref()
        .and_then(Mode::region_id)
        .is_some_and(|id| region_ids.iter().any(|r| r == id));
    if affected {
        state.mode = None;
    }
}

pub fn handle_open_editor(state: &mut AnnotationState, region_id: &str) {
    if state.region(region_id).is_none() {
        log::warn!("Cannot open editor of unknown region '{}'", region_id);
        return;
    }
    for region in state.active_regions_mut() {
        if region.id == region_id {
            region.highlighted = true;
            region.editing_labels = true;
        } else {
            region.editing_labels = false;
        }
    }
}

/// Close a region's label editor. Closing a scale's editor commits its
/// declared length to the image's measurements.
pub fn handle_close_editor(state: &mut AnnotationState, region_id: &str) {
    let Some(region) = state.region_mut(region_id) else {
        log::warn!("Cannot close editor of unknown region '{}'", region_id);
        return;
    };
    region.editing_labels = false;
    if region.is_scale() {
        recompute_active_image(state);
    }
}

/// Region to grab for a begin-* gesture, unless it is missing or locked.
fn grabbable<'a>(state: &'a AnnotationState, region_id: &str) -> Option<&'a Region> {
    let Some(region) = state.region(region_id) else {
        log::warn!("Cannot grab unknown region '{}'", region_id);
        return None;
    };
    if region.locked {
        log::warn!("Region '{}' is locked", region_id);
        return None;
    }
    Some(region)
}

fn enter(state: &mut AnnotationState, mode: Mode) {
    log::debug!("Entered {}", mode.name());
    state.mode = Some(mode);
}

pub fn handle_begin_move(state: &mut AnnotationState, region_id: &str) {
    if grabbable(state, region_id).is_none() {
        return;
    }
    enter(
        state,
        Mode::MoveRegion {
            region_id: region_id.to_string(),
        },
    );
}

/// Start resizing a box along the given edges; `[0, 0]` moves it instead.
pub fn handle_begin_box_transform(state: &mut AnnotationState, region_id: &str, directions: [i8; 2]) {
    let Some(original) = grabbable(state, region_id).and_then(|r| match r.shape {
        Shape::Box { .. } => r.shape.bounding_rect(),
        _ => None,
    }) else {
        return;
    };

    if directions == [0, 0] {
        handle_begin_move(state, region_id);
        return;
    }

    clear_highlights(state, Some(region_id));
    enter(
        state,
        Mode::ResizeBox {
            region_id: region_id.to_string(),
            freedom: directions.map(|d| d.signum()),
            original,
            is_new: false,
            edit_labels_after: false,
        },
    );
}

/// Start dragging a polygon vertex.
///
/// Grabbing the first vertex of the polygon being drawn closes it instead.
pub fn handle_begin_move_polygon_point(state: &mut AnnotationState, region_id: &str, point_index: usize) {
    let drawing_this = matches!(
        &state.mode,
        Some(Mode::DrawPolygon { region_id: drawing }) if drawing == region_id
    );
    if drawing_this && point_index == 0 {
        close_polygon(state, region_id, true);
        return;
    }

    let valid = grabbable(state, region_id).is_some_and(
        |r| matches!(&r.shape, Shape::Polygon { points, .. } if point_index < points.len()),
    );
    if !valid {
        return;
    }
    enter(
        state,
        Mode::MovePolygonPoint {
            region_id: region_id.to_string(),
            point_index,
        },
    );
}

pub fn handle_begin_move_keypoint(state: &mut AnnotationState, region_id: &str, keypoint_id: &str) {
    let valid = grabbable(state, region_id).is_some_and(
        |r| matches!(&r.shape, Shape::Keypoints { points, .. } if points.contains_key(keypoint_id)),
    );
    if !valid {
        return;
    }
    enter(
        state,
        Mode::MoveKeypoint {
            region_id: region_id.to_string(),
            keypoint_id: keypoint_id.to_string(),
        },
    );
}

/// Insert a vertex into a polygon at `point_index`.
pub fn handle_add_polygon_point(
    state: &mut AnnotationState,
    region_id: &str,
    point: [f64; 2],
    point_index: usize,
) {
    match state.region_mut(region_id).map(|r| &mut r.shape) {
        Some(Shape::Polygon { points, .. }) => {
            let index = point_index.min(points.len());
            points.insert(index, point);
        }
        _ => log::warn!("Cannot add a vertex to '{}'", region_id),
    }
}

pub fn handle_close_polygon(state: &mut AnnotationState, region_id: &str) {
    let drawing_this = matches!(
        &state.mode,
        Some(Mode::DrawPolygon { region_id: drawing }) if drawing == region_id
    );
    close_polygon(state, region_id, drawing_this);
}

/// Close a polygon and go idle. While it is being drawn, the trailing
/// rubber-band vertex is dropped first, and at least three vertices must
/// have been placed.
fn close_polygon(state: &mut AnnotationState, region_id: &str, drop_tentative: bool) {
    let Some(Shape::Polygon { points, open }) = state.region_mut(region_id).map(|r| &mut r.shape)
    else {
        log::warn!("Cannot close '{}': not a polygon", region_id);
        return;
    };
    if drop_tentative {
        if points.len().saturating_sub(1) < MIN_POLYGON_VERTICES {
            log::debug!("Polygon '{}' needs {} vertices to close", region_id, MIN_POLYGON_VERTICES);
            return;
        }
        points.pop();
    }
    *open = false;
    state.mode = None;
    log::debug!("⬡ Closed polygon '{}'", region_id);
}
