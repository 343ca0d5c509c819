//! Keypoints (pose) definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// One named landmark of a keypoints definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Landmark {
    pub label: String,
    #[serde(default)]
    pub color: Option<String>,
    /// Offset from the instance center at scale 1.0.
    pub default_position: [f64; 2],
}

/// A template of landmarks and the connections drawn between them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeypointsDefinition {
    pub landmarks: BTreeMap<String, Landmark>,
    #[serde(default)]
    pub connections: Vec<[String; 2]>,
}

impl KeypointsDefinition {
    /// Landmark positions for an instance centered at `center`.
    pub fn positions(&self, center: Point, scale: f64) -> BTreeMap<String, Point> {
        self.landmarks
            .iter()
            .map(|(id, landmark)| {
                let [dx, dy] = landmark.default_position;
                (
                    id.clone(),
                    Point::new(center.x + dx * scale, center.y + dy * scale),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_scale_around_center() {
        let mut landmarks = BTreeMap::new();
        landmarks.insert(
            "top".to_string(),
            Landmark {
                label: "Top".to_string(),
                color: None,
                default_position: [0.0, -0.1],
            },
        );
        let definition = KeypointsDefinition {
            landmarks,
            connections: Vec::new(),
        };

        let positions = definition.positions(Point::new(0.5, 0.5), 2.0);
        let top = positions["top"];
        assert!((top.x - 0.5).abs() < 1e-12);
        assert!((top.y - 0.3).abs() < 1e-12);
    }
}
