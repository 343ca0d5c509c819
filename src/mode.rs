//! Interactive mode sub-machine.
//!
//! A [`Mode`] tracks the gesture in progress (drawing, dragging, resizing,
//! erasing). `AnnotationState::mode` holds at most one; `None` is idle.

use crate::geometry::{Point, Rect};
use crate::model::RegionId;

/// The in-progress interactive operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Dragging a whole region.
    MoveRegion { region_id: RegionId },
    /// Dragging box edges.
    ResizeBox {
        region_id: RegionId,
        /// Which edges follow the pointer: -1 left/top, 1 right/bottom, 0 fixed.
        freedom: [i8; 2],
        /// Geometry when the resize started.
        original: Rect,
        /// The box was created by this gesture.
        is_new: bool,
        /// Open the label editor once the pointer is released.
        edit_labels_after: bool,
    },
    MovePolygonPoint {
        region_id: RegionId,
        point_index: usize,
    },
    MoveKeypoint {
        region_id: RegionId,
        keypoint_id: String,
    },
    /// Scaling a keypoints instance around its center.
    ResizeKeypoints {
        region_id: RegionId,
        definition_id: String,
        center: Point,
        is_new: bool,
    },
    DrawPolygon { region_id: RegionId },
    DrawLine { region_id: RegionId },
    /// Drawing a calibration segment.
    AssignScale { region_id: RegionId },
    DrawExpandingLine { region_id: RegionId },
    SetExpandingLineWidth { region_id: RegionId },
    /// Eraser selection rectangle.
    MultiDeleteSelect { origin: Point, current: Point },
}

impl Mode {
    /// Name of the mode, as shown in logs and status bars.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::MoveRegion { .. } => "MOVE_REGION",
            Mode::ResizeBox { .. } => "RESIZE_BOX",
            Mode::MovePolygonPoint { .. } => "MOVE_POLYGON_POINT",
            Mode::MoveKeypoint { .. } => "MOVE_KEYPOINT",
            Mode::ResizeKeypoints { .. } => "RESIZE_KEYPOINTS",
            Mode::DrawPolygon { .. } => "DRAW_POLYGON",
            Mode::DrawLine { .. } => "DRAW_LINE",
            Mode::AssignScale { .. } => "ASSIGN_SCALE",
            Mode::DrawExpandingLine { .. } => "DRAW_EXPANDING_LINE",
            Mode::SetExpandingLineWidth { .. } => "SET_EXPANDING_LINE_WIDTH",
            Mode::MultiDeleteSelect { .. } => "MULTI_DELETE_SELECT",
        }
    }

    /// The region this mode operates on.
    pub fn region_id(&self) -> Option<&str> {
        match self {
            Mode::MoveRegion { region_id }
            | Mode::ResizeBox { region_id, .. }
            | Mode::MovePolygonPoint { region_id, .. }
            | Mode::MoveKeypoint { region_id, .. }
            | Mode::ResizeKeypoints { region_id, .. }
            | Mode::DrawPolygon { region_id }
            | Mode::DrawLine { region_id }
            | Mode::AssignScale { region_id }
            | Mode::DrawExpandingLine { region_id }
            | Mode::SetExpandingLineWidth { region_id } => Some(region_id),
            Mode::MultiDeleteSelect { .. } => None,
        }
    }

    /// True while a freshly seeded region is still being drawn.
    /// Cancelling such a mode discards the seed.
    pub fn is_drawing(&self) -> bool {
        match self {
            Mode::DrawPolygon { .. }
            | Mode::DrawLine { .. }
            | Mode::AssignScale { .. }
            | Mode::DrawExpandingLine { .. }
            | Mode::SetExpandingLineWidth { .. } => true,
            Mode::ResizeBox { is_new, .. } | Mode::ResizeKeypoints { is_new, .. } => *is_new,
            Mode::MoveRegion { .. }
            | Mode::MovePolygonPoint { .. }
            | Mode::MoveKeypoint { .. }
            | Mode::MultiDeleteSelect { .. } => false,
        }
    }

    /// Selection rectangle of the eraser.
    pub fn selection_rect(&self) -> Option<Rect> {
        match self {
            Mode::MultiDeleteSelect { origin, current } => Some(Rect::from_corners(*origin, *current)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawing_modes() {
        let draw = Mode::DrawLine {
            region_id: "l1".to_string(),
        };
        assert!(draw.is_drawing());
        assert_eq!(draw.region_id(), Some("l1"));

        let moving = Mode::MoveRegion {
            region_id: "b1".to_string(),
        };
        assert!(!moving.is_drawing());

        let new_box = Mode::ResizeBox {
            region_id: "b2".to_string(),
            freedom: [1, 1],
            original: Rect::new(0.1, 0.1, 0.0, 0.0),
            is_new: true,
            edit_labels_after: true,
        };
        assert!(new_box.is_drawing());
        assert_eq!(new_box.name(), "RESIZE_BOX");
    }

    #[test]
    fn test_eraser_rect() {
        let mode = Mode::MultiDeleteSelect {
            origin: Point::new(0.4, 0.4),
            current: Point::new(0.1, 0.2),
        };
        let rect = mode.selection_rect().expect("eraser has a rectangle");
        assert_eq!((rect.x, rect.y), (0.1, 0.2));
        assert!((rect.w - 0.3).abs() < 1e-12);
        assert!((rect.h - 0.2).abs() < 1e-12);
        assert_eq!(mode.region_id(), None);
    }
}
