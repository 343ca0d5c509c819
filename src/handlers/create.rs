//! Region creation from a pointer-down with a create tool.

use crate::constants::NOT_CLASSIFIED;
use crate::geometry::{Point, Rect};
use crate::history::{discard_latest, save_to_history};
use crate::mode::Mode;
use crate::model::{ExpandingPoint, Region, Shape, Tool};
use crate::reducer::Env;
use crate::resolver;
use crate::state::AnnotationState;

use super::{apply_pinned_breakout, clear_highlights};

/// History entry name recorded when `tool` creates a region.
fn creation_name(tool: Tool) -> Option<&'static str> {
    match tool {
        Tool::CreatePoint => Some("Create Point"),
        Tool::CreateBox => Some("Create Box"),
        Tool::CreatePolygon => Some("Create Polygon"),
        Tool::CreateLine => Some("Create Line"),
        Tool::CreateScale => Some("Create Scale"),
        Tool::CreateExpandingLine => Some("Create Expanding Line"),
        Tool::CreateKeypoints => Some("Create Keypoints"),
        _ => None,
    }
}

/// History entry name recorded when the seed of `mode` was created.
fn seed_name(mode: &Mode) -> Option<&'static str> {
    let tool = match mode {
        Mode::ResizeBox { is_new: true, .. } => Tool::CreateBox,
        Mode::ResizeKeypoints { is_new: true, .. } => Tool::CreateKeypoints,
        Mode::DrawPolygon { .. } => Tool::CreatePolygon,
        Mode::DrawLine { .. } => Tool::CreateLine,
        Mode::AssignScale { .. } => Tool::CreateScale,
        Mode::DrawExpandingLine { .. } | Mode::SetExpandingLineWidth { .. } => {
            Tool::CreateExpandingLine
        }
        _ => return None,
    };
    creation_name(tool)
}

/// Seed a region for `tool` at `(x, y)` and enter the matching mode.
pub(super) fn create_region(
    state: &mut AnnotationState,
    tool: Tool,
    x: f64,
    y: f64,
    env: &mut Env<'_>,
) {
    let Some(name) = creation_name(tool) else {
        return;
    };
    if state.active_image().is_none() {
        log::warn!("Cannot create a region without an active image");
        return;
    }

    let id = env.next_id();
    let pointer = Point::new(x, y);

    let (shape, mode) = match tool {
        Tool::CreatePoint => (Shape::Point { x, y }, None),
        Tool::CreateBox => (
            Shape::Box { x, y, w: 0.0, h: 0.0 },
            Some(Mode::ResizeBox {
                region_id: id.clone(),
                freedom: [1, 1],
                original: Rect::new(x, y, 0.0, 0.0),
                is_new: true,
                edit_labels_after: true,
            }),
        ),
        Tool::CreatePolygon => (
            Shape::Polygon {
                points: vec![[x, y], [x, y]],
                open: true,
            },
            Some(Mode::DrawPolygon {
                region_id: id.clone(),
            }),
        ),
        Tool::CreateLine => (
            Shape::Line {
                x1: x,
                y1: y,
                x2: x,
                y2: y,
                length_ft: None,
            },
            Some(Mode::DrawLine {
                region_id: id.clone(),
            }),
        ),
        Tool::CreateScale => (
            Shape::Scale {
                x1: x,
                y1: y,
                x2: x,
                y2: y,
            },
            Some(Mode::AssignScale {
                region_id: id.clone(),
            }),
        ),
        Tool::CreateExpandingLine => (
            Shape::ExpandingLine {
                points: vec![ExpandingPoint::new(x, y)],
                expanding_width: None,
                candidate_point: None,
            },
            Some(Mode::DrawExpandingLine {
                region_id: id.clone(),
            }),
        ),
        Tool::CreateKeypoints => {
            let Some((definition_id, definition)) = state.keypoint_definitions.iter().next()
            else {
                log::warn!("No keypoints definition to instantiate");
                return;
            };
            (
                Shape::Keypoints {
                    points: definition.positions(pointer, 1.0),
                    keypoints_definition_id: definition_id.clone(),
                },
                Some(Mode::ResizeKeypoints {
                    region_id: id.clone(),
                    definition_id: definition_id.clone(),
                    center: pointer,
                    is_new: true,
                }),
            )
        }
        _ => return,
    };

    save_to_history(state, name, env);
    clear_highlights(state, None);

    let mut region = Region::new(id.clone(), shape);
    if tool != Tool::CreateScale {
        region.cls = state
            .selected_cls
            .clone()
            .or_else(|| state.region_cls_list.first().cloned());
    }
    if let Some(cls) = region.cls.clone() {
        resolver::register_device(state, env, &cls, NOT_CLASSIFIED);
    }
    resolver::apply_classification(state, &mut region);
    region.highlighted = true;
    region.editing_labels = tool == Tool::CreatePoint;

    log::debug!(
        "✏️ Created {} '{}' at ({:.3}, {:.3})",
        region.shape.kind(),
        id,
        x,
        y
    );

    if let Some(image) = state.active_image_mut() {
        image.regions.push(region);
    }
    if let Some(mode) = &mode {
        log::debug!("Entered {}", mode.name());
    }
    state.mode = mode;
    apply_pinned_breakout(state, &id);
}

/// Remove the seed region of a creation mode together with its history entry.
pub(super) fn discard_seed(state: &mut AnnotationState, mode: &Mode) {
    let Some(region_id) = mode.region_id() else {
        return;
    };
    if let Some(image) = state.active_image_mut() {
        image.regions.retain(|r| r.id != region_id);
    }
    if let Some(name) = seed_name(mode) {
        discard_latest(state, name);
    }
    log::debug!("🗑️ Discarded seed '{}'", region_id);
}
