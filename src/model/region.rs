//! Region data model.
//!
//! A region is one annotated shape on one image. The shape is a tagged variant;
//! the classification and UI flags are shared by every variant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_REGION_COLOR, NOT_CLASSIFIED};
use crate::geometry::{
    Point, Rect, box_fully_contained, line_fully_contained, point_in_rect, polygon_fully_contained,
};

/// Unique identifier for a region.
pub type RegionId = String;

/// One vertex of an expanding line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpandingPoint {
    pub x: f64,
    pub y: f64,
    /// Direction of the width offset, in radians. None until dragged.
    #[serde(default)]
    pub angle: Option<f64>,
    /// Full width at this vertex. None until dragged.
    #[serde(default)]
    pub width: Option<f64>,
}

impl ExpandingPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            angle: None,
            width: None,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Geometry of a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Shape {
    /// A single marker.
    Point { x: f64, y: f64 },
    /// An axis-aligned box anchored at its top-left corner.
    Box { x: f64, y: f64, w: f64, h: f64 },
    /// A polygon; `open` while it is still being drawn.
    Polygon {
        points: Vec<[f64; 2]>,
        #[serde(default)]
        open: bool,
    },
    /// A measured line. `length_ft` is derived from the image's scale regions.
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        length_ft: Option<f64>,
    },
    /// A calibration segment. Its declared length lives in the region's `cls`.
    Scale { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// A center line with per-vertex widths, converted to a polygon when done.
    ExpandingLine {
        points: Vec<ExpandingPoint>,
        #[serde(
            rename = "expandingWidth",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        expanding_width: Option<f64>,
        /// Rubber-band position shown before the next vertex is placed.
        #[serde(skip)]
        candidate_point: Option<Point>,
    },
    /// Named landmarks instantiated from a keypoints definition.
    Keypoints {
        points: BTreeMap<String, Point>,
        #[serde(rename = "keypointsDefinitionId")]
        keypoints_definition_id: String,
    },
}

impl Shape {
    /// The serialized `type` name of this shape.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Point { .. } => "point",
            Shape::Box { .. } => "box",
            Shape::Polygon { .. } => "polygon",
            Shape::Line { .. } => "line",
            Shape::Scale { .. } => "scale",
            Shape::ExpandingLine { .. } => "expanding-line",
            Shape::Keypoints { .. } => "keypoints",
        }
    }

    /// Every position that defines this shape.
    pub fn points(&self) -> Vec<Point> {
        match self {
            Shape::Point { x, y } => vec![Point::new(*x, *y)],
            Shape::Box { x, y, w, h } => vec![Point::new(*x, *y), Point::new(x + w, y + h)],
            Shape::Polygon { points, .. } => {
                points.iter().map(|[x, y]| Point::new(*x, *y)).collect()
            }
            Shape::Line { x1, y1, x2, y2, .. } | Shape::Scale { x1, y1, x2, y2 } => {
                vec![Point::new(*x1, *y1), Point::new(*x2, *y2)]
            }
            Shape::ExpandingLine { points, .. } => points.iter().map(|p| p.position()).collect(),
            Shape::Keypoints { points, .. } => points.values().copied().collect(),
        }
    }

    /// Bounding rectangle of the shape.
    pub fn bounding_rect(&self) -> Option<Rect> {
        match self {
            Shape::Box { x, y, w, h } => Some(Rect::new(*x, *y, *w, *h)),
            _ => Rect::bounding(self.points()),
        }
    }

    /// Shift every coordinate by `(dx, dy)`.
    pub fn shifted(&self, dx: f64, dy: f64) -> Shape {
        match self {
            Shape::Point { x, y } => Shape::Point {
                x: x + dx,
                y: y + dy,
            },
            Shape::Box { x, y, w, h } => Shape::Box {
                x: x + dx,
                y: y + dy,
                w: *w,
                h: *h,
            },
            Shape::Polygon { points, open } => Shape::Polygon {
                points: points.iter().map(|[x, y]| [x + dx, y + dy]).collect(),
                open: *open,
            },
            Shape::Line {
                x1,
                y1,
                x2,
                y2,
                length_ft,
            } => Shape::Line {
                x1: x1 + dx,
                y1: y1 + dy,
                x2: x2 + dx,
                y2: y2 + dy,
                length_ft: *length_ft,
            },
            Shape::Scale { x1, y1, x2, y2 } => Shape::Scale {
                x1: x1 + dx,
                y1: y1 + dy,
                x2: x2 + dx,
                y2: y2 + dy,
            },
            Shape::ExpandingLine {
                points,
                expanding_width,
                candidate_point,
            } => Shape::ExpandingLine {
                points: points
                    .iter()
                    .map(|p| ExpandingPoint {
                        x: p.x + dx,
                        y: p.y + dy,
                        ..*p
                    })
                    .collect(),
                expanding_width: *expanding_width,
                candidate_point: *candidate_point,
            },
            Shape::Keypoints {
                points,
                keypoints_definition_id,
            } => Shape::Keypoints {
                points: points
                    .iter()
                    .map(|(k, p)| (k.clone(), Point::new(p.x + dx, p.y + dy)))
                    .collect(),
                keypoints_definition_id: keypoints_definition_id.clone(),
            },
        }
    }

    /// Move the shape so its anchor lands on `target`.
    ///
    /// Points use their own position, boxes their center, everything else
    /// the center of its bounding rectangle.
    pub fn translated_to(&self, target: Point) -> Shape {
        match self {
            Shape::Point { .. } => Shape::Point {
                x: target.x,
                y: target.y,
            },
            Shape::Box { w, h, .. } => Shape::Box {
                x: target.x - w / 2.0,
                y: target.y - h / 2.0,
                w: *w,
                h: *h,
            },
            _ => match self.bounding_rect() {
                Some(rect) => {
                    let center = rect.center();
                    self.shifted(target.x - center.x, target.y - center.y)
                }
                None => self.clone(),
            },
        }
    }

    /// True when the shape lies entirely inside `rect`.
    pub fn fully_contained_in(&self, rect: &Rect) -> bool {
        match self {
            Shape::Point { x, y } => point_in_rect(&Point::new(*x, *y), rect),
            Shape::Box { x, y, w, h } => box_fully_contained(&Rect::new(*x, *y, *w, *h), rect),
            Shape::Polygon { points, .. } => polygon_fully_contained(points, rect),
            Shape::Line { x1, y1, x2, y2, .. } | Shape::Scale { x1, y1, x2, y2 } => {
                line_fully_contained(&Point::new(*x1, *y1), &Point::new(*x2, *y2), rect)
            }
            Shape::ExpandingLine { .. } | Shape::Keypoints { .. } => {
                self.points().iter().all(|p| point_in_rect(p, rect))
            }
        }
    }

    /// True when the shape has no usable extent.
    pub fn is_degenerate(&self) -> bool {
        match self {
            Shape::Point { .. } | Shape::Keypoints { .. } => false,
            Shape::Box { w, h, .. } => *w <= 0.0 || *h <= 0.0,
            Shape::Polygon { points, open } => {
                if *open {
                    points.len() < 2
                } else {
                    points.len() < 3
                }
            }
            Shape::Line { x1, y1, x2, y2, .. } | Shape::Scale { x1, y1, x2, y2 } => {
                x1 == x2 && y1 == y2
            }
            Shape::ExpandingLine { points, .. } => points.len() < 2,
        }
    }
}

/// A single annotated shape with its classification and UI flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Unique identifier.
    pub id: RegionId,
    /// Device symbol name (or declared length for scale regions).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cls: Option<String>,
    /// Category (system) resolved from the device.
    #[serde(default = "default_category")]
    pub category: String,
    /// Display color resolved from the category.
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub highlighted: bool,
    #[serde(default)]
    pub editing_labels: bool,
    #[serde(default)]
    pub locked: bool,
    /// Id of the breakout this region belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakout: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// The geometry, serialized inline with a `type` tag.
    #[serde(flatten)]
    pub shape: Shape,
}

fn default_category() -> String {
    NOT_CLASSIFIED.to_string()
}

fn default_color() -> String {
    DEFAULT_REGION_COLOR.to_string()
}

fn default_visible() -> bool {
    true
}

impl Region {
    /// Create an unclassified, visible region.
    pub fn new(id: impl Into<RegionId>, shape: Shape) -> Self {
        Self {
            id: id.into(),
            cls: None,
            category: default_category(),
            color: default_color(),
            visible: true,
            highlighted: false,
            editing_labels: false,
            locked: false,
            breakout: None,
            tags: Vec::new(),
            comment: None,
            shape,
        }
    }

    pub fn with_cls(mut self, cls: impl Into<String>) -> Self {
        self.cls = Some(cls.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_breakout(mut self, breakout: impl Into<String>) -> Self {
        self.breakout = Some(breakout.into());
        self
    }

    pub fn is_scale(&self) -> bool {
        matches!(self.shape, Shape::Scale { .. })
    }

    pub fn is_line(&self) -> bool {
        matches!(self.shape, Shape::Line { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_json_is_flat() {
        let region = Region::new(
            "r1",
            Shape::Line {
                x1: 0.1,
                y1: 0.2,
                x2: 0.3,
                y2: 0.4,
                length_ft: Some(12.5),
            },
        )
        .with_cls("CONDUIT");

        let json = serde_json::to_value(&region).expect("serialize");
        assert_eq!(json["type"], "line");
        assert_eq!(json["cls"], "CONDUIT");
        assert_eq!(json["length_ft"], 12.5);
        assert_eq!(json["editingLabels"], false);
        assert_eq!(json["category"], NOT_CLASSIFIED);
    }

    #[test]
    fn test_region_json_defaults() {
        let json = r##"{"id":"p1","type":"point","x":0.5,"y":0.25}"##;
        let region: Region = serde_json::from_str(json).expect("deserialize");
        assert!(region.visible);
        assert_eq!(region.color, DEFAULT_REGION_COLOR);
        assert_eq!(region.shape, Shape::Point { x: 0.5, y: 0.25 });
    }

    #[test]
    fn test_expanding_line_tag() {
        let json = r##"{"id":"e1","type":"expanding-line","points":[{"x":0.1,"y":0.1}],"expandingWidth":0.01}"##;
        let region: Region = serde_json::from_str(json).expect("deserialize");
        match region.shape {
            Shape::ExpandingLine {
                points,
                expanding_width,
                candidate_point,
            } => {
                assert_eq!(points.len(), 1);
                assert_eq!(points[0].width, None);
                assert_eq!(expanding_width, Some(0.01));
                assert_eq!(candidate_point, None);
            }
            other => panic!("Expected expanding line, got {:?}", other),
        }
    }

    #[test]
    fn test_degenerate_shapes() {
        assert!(
            Shape::Box {
                x: 0.1,
                y: 0.1,
                w: 0.0,
                h: 0.2
            }
            .is_degenerate()
        );
        assert!(
            Shape::Scale {
                x1: 0.1,
                y1: 0.1,
                x2: 0.1,
                y2: 0.1
            }
            .is_degenerate()
        );
        assert!(
            !Shape::Polygon {
                points: vec![[0.0, 0.0], [0.1, 0.0], [0.1, 0.1]],
                open: false
            }
            .is_degenerate()
        );
    }

    #[test]
    fn test_keypoints_containment() {
        let mut points = BTreeMap::new();
        points.insert("head".to_string(), Point::new(0.2, 0.2));
        points.insert("tail".to_string(), Point::new(0.3, 0.3));
        let shape = Shape::Keypoints {
            points,
            keypoints_definition_id: "valve".to_string(),
        };
        assert!(shape.fully_contained_in(&Rect::new(0.1, 0.1, 0.3, 0.3)));
        assert!(!shape.fully_contained_in(&Rect::new(0.1, 0.1, 0.15, 0.15)));
    }
}
