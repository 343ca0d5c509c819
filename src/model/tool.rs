//! Annotation tools.

use serde::{Deserialize, Serialize};

/// Tools the operator can pick from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    /// Select and edit existing regions
    #[default]
    Select,
    /// Pan the view (handled by the host)
    Pan,
    /// Zoom the view (handled by the host)
    Zoom,
    CreatePoint,
    CreateBox,
    CreatePolygon,
    CreateLine,
    /// Draw a calibration segment
    CreateScale,
    CreateExpandingLine,
    CreateKeypoints,
    /// Eraser: drag a rectangle to delete everything inside it
    MultiDeleteSelect,
    /// Not a real tool; selecting it toggles tag display
    ShowTags,
}

impl Tool {
    /// Get the display name for this tool.
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Select => "Select",
            Tool::Pan => "Pan",
            Tool::Zoom => "Zoom",
            Tool::CreatePoint => "Point",
            Tool::CreateBox => "Box",
            Tool::CreatePolygon => "Polygon",
            Tool::CreateLine => "Line",
            Tool::CreateScale => "Scale",
            Tool::CreateExpandingLine => "Expanding Line",
            Tool::CreateKeypoints => "Keypoints",
            Tool::MultiDeleteSelect => "Eraser",
            Tool::ShowTags => "Show Tags",
        }
    }

    /// Check if this tool creates regions on pointer-down.
    pub fn is_create_tool(&self) -> bool {
        matches!(
            self,
            Tool::CreatePoint
                | Tool::CreateBox
                | Tool::CreatePolygon
                | Tool::CreateLine
                | Tool::CreateScale
                | Tool::CreateExpandingLine
                | Tool::CreateKeypoints
        )
    }
}
