//! Image data model.

use serde::{Deserialize, Serialize};

use crate::model::Region;

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSize {
    pub w: u32,
    pub h: u32,
}

/// A drawing sheet (or a video keyframe) and its regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Source reference (path or URL)
    pub src: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Regions in drawing order
    #[serde(default)]
    pub regions: Vec<Region>,
    /// Known once the host reports the image as loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixel_size: Option<PixelSize>,
    /// Timestamp within the video, for keyframes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_time: Option<f64>,
}

impl Image {
    pub fn new(src: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            name: name.into(),
            regions: Vec::new(),
            pixel_size: None,
            frame_time: None,
        }
    }

    pub fn with_pixel_size(mut self, w: u32, h: u32) -> Self {
        self.pixel_size = Some(PixelSize { w, h });
        self
    }

    pub fn with_regions(mut self, regions: Vec<Region>) -> Self {
        self.regions = regions;
        self
    }

    /// Index of the region with the given id.
    pub fn region_index(&self, id: &str) -> Option<usize> {
        self.regions.iter().position(|r| r.id == id)
    }

    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn region_mut(&mut self, id: &str) -> Option<&mut Region> {
        self.regions.iter_mut().find(|r| r.id == id)
    }
}
