//! Editing actions.
//!
//! Every UI event and command is represented as an [`Action`]. On the wire an
//! action is a JSON object `{ "type": "MOUSE_DOWN", "x": 0.1, "y": 0.2 }`.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::model::{Region, Tool};

/// Actions that can be dispatched against an `AnnotationState`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    // Pointer & tools
    /// Pointer pressed at normalized coordinates
    MouseDown { x: f64, y: f64 },
    /// Pointer moved
    MouseMove { x: f64, y: f64 },
    /// Pointer released
    MouseUp { x: f64, y: f64 },
    /// Abort the gesture in progress, or close editors / clear highlights
    Cancel,
    SelectTool { selected_tool: Tool },
    /// Remember the class used for new regions
    SelectClassification { cls: Option<String> },
    SetAllowedArea { area: Option<Rect> },

    // Images
    SelectImage { index: usize },
    /// The host decoded the active image
    ImageLoaded { width: u32, height: u32 },

    // Regions
    SelectRegion { region: Region },
    ChangeRegion { region: Region },
    /// Change a region's category (device-wide for user-defined devices)
    ChangeRegionCategory { region: Region, category: String },
    /// Delete one region, or every highlighted region when omitted
    DeleteRegion {
        #[serde(default)]
        region: Option<Region>,
    },
    /// Keyboard delete of the highlighted regions
    DeleteSelectedRegion,
    OpenRegionEditor { region: Region },
    CloseRegionEditor { region: Region },
    BeginMovePoint { point: Region },
    BeginMoveRegion { region: Region },
    BeginBoxTransform {
        #[serde(rename = "box")]
        region: Region,
        directions: [i8; 2],
    },
    BeginMovePolygonPoint { polygon: Region, point_index: usize },
    BeginMoveKeypoint { region: Region, keypoint_id: String },
    AddPolygonPoint {
        polygon: Region,
        point: [f64; 2],
        point_index: usize,
    },
    ClosePolygon { polygon: Region },

    // Devices & categories
    AddNewDevice { symbol_name: String, category: String },
    DeleteDeviceName { symbol_name: String },
    BulkEditDeviceNameAndCategory {
        old_name: String,
        new_name: String,
        category: String,
    },
    AddNewCategory {
        category: String,
        #[serde(default)]
        color: Option<String>,
    },
    ChangeCategoryColor { category: String, color: String },
    ToggleCategoryDimming { category: String },
    /// Pending devices were persisted upstream
    MarkDevicesSaved,
    /// Pending categories were persisted upstream
    MarkCategoriesSaved,

    // Breakouts
    AddNewBreakout {
        name: String,
        #[serde(default)]
        region: Option<Region>,
    },
    AddNewBreakoutByCategory { category: String },
    ToggleBreakoutVisibility { breakout_id: String },
    DeleteBreakout { breakout_id: String },
    RenameBreakout { breakout_id: String, name: String },
    AssignBreakout {
        region: Region,
        #[serde(default)]
        breakout_id: Option<String>,
    },
    PinBreakout {
        #[serde(default)]
        breakout_id: Option<String>,
    },

    // History
    /// Roll back to the newest history snapshot
    RestoreHistory,
}

impl Action {
    /// Parse an action from its JSON form.
    ///
    /// Unknown `type` values fail to parse; the host treats that as "no change".
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Wire name of the action.
    pub fn type_name(&self) -> &'static str {
        match self {
            Action::MouseDown { .. } => "MOUSE_DOWN",
            Action::MouseMove { .. } => "MOUSE_MOVE",
            Action::MouseUp { .. } => "MOUSE_UP",
            Action::Cancel => "CANCEL",
            Action::SelectTool { .. } => "SELECT_TOOL",
            Action::SelectClassification { .. } => "SELECT_CLASSIFICATION",
            Action::SetAllowedArea { .. } => "SET_ALLOWED_AREA",
            Action::SelectImage { .. } => "SELECT_IMAGE",
            Action::ImageLoaded { .. } => "IMAGE_LOADED",
            Action::SelectRegion { .. } => "SELECT_REGION",
            Action::ChangeRegion { .. } => "CHANGE_REGION",
            Action::ChangeRegionCategory { .. } => "CHANGE_REGION_CATEGORY",
            Action::DeleteRegion { .. } => "DELETE_REGION",
            Action::DeleteSelectedRegion => "DELETE_SELECTED_REGION",
            Action::OpenRegionEditor { .. } => "OPEN_REGION_EDITOR",
            Action::CloseRegionEditor { .. } => "CLOSE_REGION_EDITOR",
            Action::BeginMovePoint { .. } => "BEGIN_MOVE_POINT",
            Action::BeginMoveRegion { .. } => "BEGIN_MOVE_REGION",
            Action::BeginBoxTransform { .. } => "BEGIN_BOX_TRANSFORM",
            Action::BeginMovePolygonPoint { .. } => "BEGIN_MOVE_POLYGON_POINT",
            Action::BeginMoveKeypoint { .. } => "BEGIN_MOVE_KEYPOINT",
            Action::AddPolygonPoint { .. } => "ADD_POLYGON_POINT",
            Action::ClosePolygon { .. } => "CLOSE_POLYGON",
            Action::AddNewDevice { .. } => "ADD_NEW_DEVICE",
            Action::DeleteDeviceName { .. } => "DELETE_DEVICE_NAME",
            Action::BulkEditDeviceNameAndCategory { .. } => "BULK_EDIT_DEVICE_NAME_AND_CATEGORY",
            Action::AddNewCategory { .. } => "ADD_NEW_CATEGORY",
            Action::ChangeCategoryColor { .. } => "CHANGE_CATEGORY_COLOR",
            Action::ToggleCategoryDimming { .. } => "TOGGLE_CATEGORY_DIMMING",
            Action::MarkDevicesSaved => "MARK_DEVICES_SAVED",
            Action::MarkCategoriesSaved => "MARK_CATEGORIES_SAVED",
            Action::AddNewBreakout { .. } => "ADD_NEW_BREAKOUT",
            Action::AddNewBreakoutByCategory { .. } => "ADD_NEW_BREAKOUT_BY_CATEGORY",
            Action::ToggleBreakoutVisibility { .. } => "TOGGLE_BREAKOUT_VISIBILITY",
            Action::DeleteBreakout { .. } => "DELETE_BREAKOUT",
            Action::RenameBreakout { .. } => "RENAME_BREAKOUT",
            Action::AssignBreakout { .. } => "ASSIGN_BREAKOUT",
            Action::PinBreakout { .. } => "PIN_BREAKOUT",
            Action::RestoreHistory => "RESTORE_HISTORY",
        }
    }

    /// History entry name for actions whose pre-state is snapshotted by the
    /// history wrapper. None for every other action.
    pub fn history_name(&self) -> Option<&'static str> {
        match self {
            Action::DeleteRegion { .. } => Some("Delete Region"),
            Action::DeleteSelectedRegion => Some("Delete Selected Regions"),
            Action::BeginBoxTransform { .. } => Some("Transform/Move Box"),
            Action::BeginMovePoint { .. } => Some("Move Point"),
            Action::BeginMoveRegion { .. } => Some("Move Region"),
            Action::BeginMovePolygonPoint { .. } => Some("Move Polygon Point"),
            Action::BeginMoveKeypoint { .. } => Some("Move Keypoint"),
            Action::DeleteDeviceName { .. } => Some("Delete Device Name"),
            _ => None,
        }
    }

    /// Pointer coordinates carried by the action.
    pub fn pointer(&self) -> Option<(f64, f64)> {
        match self {
            Action::MouseDown { x, y } | Action::MouseMove { x, y } | Action::MouseUp { x, y } => {
                Some((*x, *y))
            }
            _ => None,
        }
    }

    /// Same action with its pointer coordinates replaced.
    pub fn with_pointer(self, x: f64, y: f64) -> Self {
        match self {
            Action::MouseDown { .. } => Action::MouseDown { x, y },
            Action::MouseMove { .. } => Action::MouseMove { x, y },
            Action::MouseUp { .. } => Action::MouseUp { x, y },
            other => other,
        }
    }
}
