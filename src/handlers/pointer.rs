//! Pointer-driven transitions of the mode sub-machine.
//!
//! Pointer-down starts gestures (creating regions, placing vertices, opening
//! the eraser rectangle), pointer-move updates the geometry of the gesture in
//! progress and pointer-up completes it.

use std::f64::consts::FRAC_PI_2;

use crate::constants::{MIN_POLYGON_VERTICES, expanding_line, keypoints, threshold};
use crate::geometry::{Point, Rect, translate_region};
use crate::history::save_to_history;
use crate::measurement::recompute_active_image;
use crate::mode::Mode;
use crate::model::{ExpandingPoint, Shape, Tool};
use crate::reducer::Env;
use crate::state::AnnotationState;

use super::clear_highlights;
use super::create::{create_region, discard_seed};

/// Handle a pointer press.
pub fn handle_mouse_down(state: &mut AnnotationState, x: f64, y: f64, env: &mut Env<'_>) {
    let pointer = Point::new(x, y);
    state.mouse_down_at = Some(pointer);

    let Some(mode) = state.mode.clone() else {
        let tool = state.selected_tool;
        match tool {
            Tool::MultiDeleteSelect => {
                log::debug!("Entered MULTI_DELETE_SELECT");
                state.mode = Some(Mode::MultiDeleteSelect {
                    origin: pointer,
                    current: pointer,
                });
            }
            tool if tool.is_create_tool() => create_region(state, tool, x, y, env),
            _ => {}
        }
        return;
    };

    match &mode {
        Mode::DrawPolygon { region_id } => place_polygon_vertex(state, region_id, pointer),
        Mode::DrawLine { region_id } | Mode::AssignScale { region_id } => {
            set_segment_end(state, region_id, pointer);
            finish_segment(state, &mode);
        }
        Mode::DrawExpandingLine { region_id } => {
            place_expanding_vertex(state, &mode, region_id, pointer)
        }
        Mode::SetExpandingLineWidth { .. } => finish_expanding_line(state, &mode),
        _ => {}
    }
}

/// Handle a pointer move.
pub fn handle_mouse_move(state: &mut AnnotationState, x: f64, y: f64) {
    let Some(mode) = state.mode.clone() else {
        return;
    };
    let pointer = Point::new(x, y);
    log::trace!("{} move to ({:.4}, {:.4})", mode.name(), x, y);

    match mode {
        Mode::MoveRegion { region_id } => {
            if let Some(region) = state.region_mut(&region_id) {
                *region = translate_region(region, x, y);
            }
        }
        Mode::ResizeBox {
            region_id,
            freedom,
            original,
            is_new,
            edit_labels_after,
        } => {
            let freedom = resize_box(state, &region_id, freedom, &original, pointer);
            state.mode = Some(Mode::ResizeBox {
                region_id,
                freedom,
                original,
                is_new,
                edit_labels_after,
            });
        }
        Mode::MovePolygonPoint {
            region_id,
            point_index,
        } => {
            if let Some(Shape::Polygon { points, .. }) =
                state.region_mut(&region_id).map(|r| &mut r.shape)
            {
                if let Some(vertex) = points.get_mut(point_index) {
                    *vertex = [x, y];
                }
            }
        }
        Mode::MoveKeypoint {
            region_id,
            keypoint_id,
        } => {
            if let Some(Shape::Keypoints { points, .. }) =
                state.region_mut(&region_id).map(|r| &mut r.shape)
            {
                if let Some(position) = points.get_mut(&keypoint_id) {
                    *position = pointer;
                }
            }
        }
        Mode::ResizeKeypoints {
            region_id,
            definition_id,
            center,
            ..
        } => {
            let Some(definition) = state.keypoint_definitions.get(&definition_id).cloned() else {
                return;
            };
            let scale = center.distance_to(&pointer) / keypoints::UNIT_RADIUS;
            if let Some(Shape::Keypoints { points, .. }) =
                state.region_mut(&region_id).map(|r| &mut r.shape)
            {
                *points = definition.positions(center, scale);
            }
        }
        Mode::DrawPolygon { region_id } => {
            if let Some(Shape::Polygon { points, .. }) =
                state.region_mut(&region_id).map(|r| &mut r.shape)
            {
                if let Some(last) = points.last_mut() {
                    *last = [x, y];
                }
            }
        }
        Mode::DrawLine { region_id } | Mode::AssignScale { region_id } => {
            set_segment_end(state, &region_id, pointer)
        }
        Mode::DrawExpandingLine { region_id } => {
            let dragging = state.mouse_down_at.is_some();
            if let Some(Shape::ExpandingLine {
                points,
                candidate_point,
                ..
            }) = state.region_mut(&region_id).map(|r| &mut r.shape)
            {
                if dragging {
                    if let Some(last) = points.last_mut() {
                        last.width = Some(2.0 * last.position().distance_to(&pointer));
                        last.angle = Some((last.x - x).atan2(last.y - y));
                    }
                } else {
                    *candidate_point = Some(pointer);
                }
            }
        }
        Mode::SetExpandingLineWidth { region_id } => {
            if let Some(Shape::ExpandingLine {
                points,
                expanding_width,
                ..
            }) = state.region_mut(&region_id).map(|r| &mut r.shape)
            {
                if let Some(last) = points.last() {
                    *expanding_width = Some(2.0 * last.position().distance_to(&pointer));
                }
            }
        }
        Mode::MultiDeleteSelect { origin, .. } => {
            state.mode = Some(Mode::MultiDeleteSelect {
                origin,
                current: pointer,
            });
        }
    }
}

/// Handle a pointer release.
pub fn handle_mouse_up(state: &mut AnnotationState, x: f64, y: f64, env: &mut Env<'_>) {
    state.mouse_down_at = None;
    let Some(mode) = state.mode.clone() else {
        return;
    };
    let pointer = Point::new(x, y);

    match &mode {
        Mode::MoveRegion { .. }
        | Mode::MovePolygonPoint { .. }
        | Mode::MoveKeypoint { .. }
        | Mode::ResizeKeypoints { .. } => state.mode = None,
        Mode::ResizeBox {
            region_id,
            original,
            is_new,
            edit_labels_after,
            ..
        } => {
            state.mode = None;
            if !*is_new {
                return;
            }
            let accidental = (original.x - x).abs() < threshold::MIN_DRAG_DISTANCE
                || (original.y - y).abs() < threshold::MIN_DRAG_DISTANCE;
            if accidental {
                discard_seed(state, &mode);
            } else if *edit_labels_after {
                if let Some(region) = state.region_mut(region_id) {
                    region.editing_labels = true;
                }
            }
        }
        Mode::DrawLine { region_id } | Mode::AssignScale { region_id } => {
            let dragged = segment_start(state, region_id)
                .is_some_and(|start| start.distance_to(&pointer) >= threshold::MIN_DRAG_DISTANCE);
            if dragged {
                set_segment_end(state, region_id, pointer);
                finish_segment(state, &mode);
            }
        }
        Mode::MultiDeleteSelect { origin, .. } => erase(state, *origin, pointer, env),
        Mode::DrawPolygon { .. }
        | Mode::DrawExpandingLine { .. }
        | Mode::SetExpandingLineWidth { .. } => {}
    }
}

/// Abort the gesture in progress, or close editors and highlights when idle.
pub fn handle_cancel(state: &mut AnnotationState) {
    state.mouse_down_at = None;
    match state.mode.take() {
        Some(mode) if mode.is_drawing() => {
            log::debug!("Cancelled {}", mode.name());
            discard_seed(state, &mode);
        }
        Some(mode) => log::debug!("Left {}", mode.name()),
        None => close_editors_or_highlights(state),
    }
}

fn close_editors_or_highlights(state: &mut AnnotationState) {
    let mut closed_any = false;
    let mut closed_scale = false;
    for region in state.active_regions_mut() {
        if region.editing_labels {
            region.editing_labels = false;
            closed_any = true;
            closed_scale |= region.is_scale();
        }
    }

    if closed_scale {
        recompute_active_image(state);
    }
    if !closed_any {
        clear_highlights(state, None);
    }
}

/// Switch tools. Picking `show-tags` only toggles tag display.
pub fn handle_select_tool(state: &mut AnnotationState, tool: Tool) {
    if tool == Tool::ShowTags {
        state.show_tags = !state.show_tags;
        log::debug!("🏷️ Show tags: {}", state.show_tags);
        return;
    }

    if let Some(mode) = state.mode.take() {
        if mode.is_drawing() {
            discard_seed(state, &mode);
        }
    }
    state.mouse_down_at = None;
    state.selected_tool = tool;
    log::debug!("🔧 Tool: {}", tool.name());
}

fn place_polygon_vertex(state: &mut AnnotationState, region_id: &str, pointer: Point) {
    let mut closed = false;
    if let Some(Shape::Polygon { points, open }) = state.region_mut(region_id).map(|r| &mut r.shape)
    {
        let placed = points.len().saturating_sub(1);
        let near_first = points
            .first()
            .is_some_and(|[fx, fy]| Point::new(*fx, *fy).distance_to(&pointer) < threshold::CLOSE_DISTANCE);

        if placed >= MIN_POLYGON_VERTICES && near_first {
            points.pop();
            *open = false;
            closed = true;
        } else {
            if let Some(last) = points.last_mut() {
                *last = [pointer.x, pointer.y];
            }
            points.push([pointer.x, pointer.y]);
        }
    }

    if closed {
        log::debug!("⬡ Closed polygon '{}'", region_id);
        state.mode = None;
    }
}

fn segment_start(state: &AnnotationState, region_id: &str) -> Option<Point> {
    match state.region(region_id)?.shape {
        Shape::Line { x1, y1, .. } | Shape::Scale { x1, y1, .. } => Some(Point::new(x1, y1)),
        _ => None,
    }
}

fn set_segment_end(state: &mut AnnotationState, region_id: &str, pointer: Point) {
    if let Some(region) = state.region_mut(region_id) {
        match &mut region.shape {
            Shape::Line { x2, y2, .. } | Shape::Scale { x2, y2, .. } => {
                *x2 = pointer.x;
                *y2 = pointer.y;
            }
            _ => {}
        }
    }
}

/// Complete a line or scale segment.
///
/// Coincident endpoints discard the region. Lines update the image's
/// measurements right away; scales open their label editor so the declared
/// length can be entered, and are measured once it closes.
fn finish_segment(state: &mut AnnotationState, mode: &Mode) {
    state.mode = None;
    let Some(region_id) = mode.region_id() else {
        return;
    };
    let Some(region) = state.region(region_id) else {
        return;
    };

    if region.shape.is_degenerate() {
        discard_seed(state, mode);
        return;
    }

    if region.is_scale() {
        if let Some(region) = state.region_mut(region_id) {
            region.highlighted = true;
            region.editing_labels = true;
        }
        log::debug!("📐 Scale '{}' drawn", region_id);
    } else {
        recompute_active_image(state);
        log::debug!("📏 Line '{}' drawn", region_id);
    }
}

fn place_expanding_vertex(
    state: &mut AnnotationState,
    mode: &Mode,
    region_id: &str,
    pointer: Point,
) {
    enum Next {
        Continue,
        AskWidth,
        Finish,
    }

    let mut next = Next::Continue;
    if let Some(Shape::ExpandingLine {
        points,
        candidate_point,
        ..
    }) = state.region_mut(region_id).map(|r| &mut r.shape)
    {
        let on_last = points.len() > 1
            && points
                .last()
                .is_some_and(|last| last.position().distance_to(&pointer) < threshold::CLOSE_DISTANCE);

        if on_last {
            let has_width = points.last().is_some_and(|last| last.width.is_some());
            next = if has_width { Next::Finish } else { Next::AskWidth };
        } else {
            points.push(ExpandingPoint::new(pointer.x, pointer.y));
            *candidate_point = None;
        }
    }

    match next {
        Next::Continue => {}
        Next::AskWidth => {
            log::debug!("Entered SET_EXPANDING_LINE_WIDTH");
            state.mode = Some(Mode::SetExpandingLineWidth {
                region_id: region_id.to_string(),
            });
        }
        Next::Finish => finish_expanding_line(state, mode),
    }
}

/// Convert the expanding line of `mode` into a closed polygon and go idle.
fn finish_expanding_line(state: &mut AnnotationState, mode: &Mode) {
    state.mode = None;
    let Some(region_id) = mode.region_id() else {
        return;
    };

    let degenerate = state
        .region(region_id)
        .is_none_or(|r| r.shape.is_degenerate());
    if degenerate {
        discard_seed(state, mode);
        return;
    }

    if let Some(region) = state.region_mut(region_id) {
        if let Shape::ExpandingLine {
            points,
            expanding_width,
            ..
        } = &region.shape
        {
            let width = expanding_width.unwrap_or(expanding_line::DEFAULT_WIDTH);
            region.shape = Shape::Polygon {
                points: expanding_line_polygon(points, width),
                open: false,
            };
            log::debug!("⬡ Expanding line '{}' converted to polygon", region_id);
        }
    }
}

/// Outline of an expanding line as polygon vertices.
///
/// Each vertex is offset by `±(sin(angle), cos(angle)) * width / 2`; the
/// outline walks forward along one side and back along the other. Vertices
/// without an angle use the direction between their neighbours rotated by a
/// right angle, vertices without a width use `default_width`.
pub fn expanding_line_polygon(points: &[ExpandingPoint], default_width: f64) -> Vec<[f64; 2]> {
    let last = points.len().saturating_sub(1);
    let mut forward = Vec::with_capacity(points.len());
    let mut backward = Vec::with_capacity(points.len());

    for (i, point) in points.iter().enumerate() {
        let angle = point.angle.unwrap_or_else(|| {
            let prev = &points[i.saturating_sub(1)];
            let next = &points[(i + 1).min(last)];
            (prev.x - next.x).atan2(prev.y - next.y) + FRAC_PI_2
        });
        let half = point.width.unwrap_or(default_width) / 2.0;
        let dx = angle.sin() * half;
        let dy = angle.cos() * half;
        forward.push([point.x + dx, point.y + dy]);
        backward.push([point.x - dx, point.y - dy]);
    }

    forward.extend(backward.into_iter().rev());
    forward
}

/// New box geometry while edges follow the pointer.
///
/// Returns the freedom to keep using: a free axis flips direction once its
/// dimension collapses, so the pointer can drag through zero.
fn resize_box(
    state: &mut AnnotationState,
    region_id: &str,
    freedom: [i8; 2],
    original: &Rect,
    pointer: Point,
) -> [i8; 2] {
    let [x_free, y_free] = freedom;
    let (x, w) = resize_axis(x_free, original.x, original.w, pointer.x);
    let (y, h) = resize_axis(y_free, original.y, original.h, pointer.y);

    if let Some(region) = state.region_mut(region_id) {
        if matches!(region.shape, Shape::Box { .. }) {
            region.shape = Shape::Box { x, y, w, h };
        }
    }

    [
        if w <= threshold::RESIZE_FLIP { -x_free } else { x_free },
        if h <= threshold::RESIZE_FLIP { -y_free } else { y_free },
    ]
}

/// Start and extent along one axis.
fn resize_axis(free: i8, start: f64, extent: f64, pointer: f64) -> (f64, f64) {
    match free {
        0 => (start, extent),
        -1 => {
            let new_start = (start + extent).min(pointer);
            (new_start, extent + (start - new_start))
        }
        _ => (start, (pointer - start).max(0.0)),
    }
}

/// Delete everything erasable inside the rectangle from `origin` to `end`.
fn erase(state: &mut AnnotationState, origin: Point, end: Point, env: &mut Env<'_>) {
    state.mode = None;
    let rect = Rect::from_corners(origin, end);

    let Some(image) = state.active_image() else {
        return;
    };
    let doomed: Vec<String> = image
        .regions
        .iter()
        .filter(|r| r.visible && !r.is_scale() && !state.is_dimmed(r))
        .filter(|r| r.shape.fully_contained_in(&rect))
        .map(|r| r.id.clone())
        .collect();

    if doomed.is_empty() {
        log::debug!("Eraser selection contained nothing");
        return;
    }

    let count = doomed.len();
    save_to_history(state, format!("Eraser Tool: Deleted {} regions", count), env);

    if let Some(image) = state.active_image_mut() {
        image.regions.retain(|r| !doomed.contains(&r.id));
    }
    recompute_active_image(state);
    log::debug!("🧹 Eraser deleted {} regions", count);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_axis_grows_and_flips() {
        assert_eq!(resize_axis(0, 0.1, 0.2, 0.9), (0.1, 0.2));

        let (x, w) = resize_axis(1, 0.1, 0.0, 0.3);
        assert_eq!(x, 0.1);
        assert!((w - 0.2).abs() < 1e-12);

        assert_eq!(resize_axis(1, 0.5, 0.0, 0.3), (0.5, 0.0));

        let (x, w) = resize_axis(-1, 0.5, 0.0, 0.3);
        assert_eq!(x, 0.3);
        assert!((w - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_expanding_line_polygon_offsets() {
        let points = vec![
            ExpandingPoint {
                x: 0.5,
                y: 0.1,
                angle: Some(FRAC_PI_2),
                width: Some(0.2),
            },
            ExpandingPoint {
                x: 0.5,
                y: 0.5,
                angle: Some(FRAC_PI_2),
                width: Some(0.2),
            },
        ];
        let polygon = expanding_line_polygon(&points, 0.005);
        assert_eq!(polygon.len(), 4);
        let expected = [[0.6, 0.1], [0.6, 0.5], [0.4, 0.5], [0.4, 0.1]];
        for (got, want) in polygon.iter().zip(expected.iter()) {
            assert!((got[0] - want[0]).abs() < 1e-9, "{:?} vs {:?}", got, want);
            assert!((got[1] - want[1]).abs() < 1e-9, "{:?} vs {:?}", got, want);
        }
    }

    #[test]
    fn test_expanding_line_polygon_defaults() {
        let points = vec![ExpandingPoint::new(0.1, 0.5), ExpandingPoint::new(0.5, 0.5)];
        let polygon = expanding_line_polygon(&points, 0.2);
        assert_eq!(polygon.len(), 4);
        let height = (polygon[0][1] - polygon[3][1]).abs();
        assert!((height - 0.2).abs() < 1e-9);
        assert!((polygon[0][0] - 0.1).abs() < 1e-9);
    }
}
