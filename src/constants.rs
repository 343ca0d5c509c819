//! Global constants for the EDAT annotation core

/// Category assigned to regions whose class has no known device.
pub const NOT_CLASSIFIED: &str = "NOT CLASSIFIED";

/// Color used when a category has no registered color.
pub const DEFAULT_REGION_COLOR: &str = "#C4A484";

/// Maximum number of history entries kept by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Minimum time between two accepted pointer-move actions, in milliseconds.
pub const DEFAULT_MOVE_THROTTLE_MS: u64 = 16;

/// Vertices a polygon needs before it can be closed while drawing.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Storage key used for auto-saved snapshots.
pub const DEFAULT_AUTOSAVE_KEY: &str = "edat-autosave";

/// Distance thresholds in normalized image coordinates.
pub mod threshold {
    /// Pointer distance to a vertex that counts as "clicking on it"
    /// (closing a polygon, finishing an expanding line).
    pub const CLOSE_DISTANCE: f64 = 0.002;
    /// Minimum pointer travel before a new shape counts as dragged.
    pub const MIN_DRAG_DISTANCE: f64 = 0.002;
    /// Box dimension below which the free resize axis flips direction.
    pub const RESIZE_FLIP: f64 = 0.001;
}

/// Expanding-line defaults.
pub mod expanding_line {
    /// Width used for vertices that never received one.
    pub const DEFAULT_WIDTH: f64 = 0.005;
}

/// Keypoints defaults.
pub mod keypoints {
    /// Pointer distance from the center that maps to a landmark scale of 1.0.
    pub const UNIT_RADIUS: f64 = 0.15;
}
