//! Persistence snapshot of the annotation document.
//!
//! The snapshot is the part of the state worth keeping across sessions: the
//! images with their regions, breakouts, devices and categories, plus a few
//! tool preferences. Interaction state (mode, history, highlights of an
//! unfinished gesture) is not part of it.
//!
//! # Versioning
//!
//! Snapshots carry an integer `version`. Files written by a newer build are
//! rejected; missing versions are read as version 1.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Breakout, Device, Image, Region, Tool};
use crate::state::AnnotationState;

use super::FormatError;

/// One image as stored in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedImage {
    #[serde(default)]
    pub regions: Vec<Region>,
    pub src: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_time: Option<f64>,
}

impl From<&Image> for PersistedImage {
    fn from(image: &Image) -> Self {
        Self {
            regions: image.regions.clone(),
            src: image.src.clone(),
            name: image.name.clone(),
            frame_time: image.frame_time,
        }
    }
}

impl From<PersistedImage> for Image {
    fn from(image: PersistedImage) -> Self {
        Self {
            src: image.src,
            name: image.name,
            regions: image.regions,
            pixel_size: None,
            frame_time: image.frame_time,
        }
    }
}

/// The serializable projection of an [`AnnotationState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    /// Snapshot format version.
    #[serde(default = "first_version")]
    pub version: u32,
    #[serde(default)]
    pub selected_image: Option<usize>,
    pub images: Vec<PersistedImage>,
    #[serde(default)]
    pub breakouts: Vec<Breakout>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub device_list: Vec<Device>,
    #[serde(default)]
    pub categories_color_map: BTreeMap<String, String>,
    #[serde(default)]
    pub selected_tool: Tool,
    #[serde(default = "default_show_tags")]
    pub show_tags: bool,
}

fn first_version() -> u32 {
    1
}

fn default_show_tags() -> bool {
    true
}

impl PersistedState {
    /// Current snapshot format version.
    pub const CURRENT_VERSION: u32 = 1;

    /// Project the persistable part of `state`.
    pub fn from_state(state: &AnnotationState) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            selected_image: state.selected_image,
            images: state.images.iter().map(PersistedImage::from).collect(),
            breakouts: state.breakouts.clone(),
            categories: state.categories.clone(),
            device_list: state.device_list.clone(),
            categories_color_map: state.categories_color_map.clone(),
            selected_tool: state.selected_tool,
            show_tags: state.show_tags,
        }
    }

    pub fn to_json(&self) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot.
    ///
    /// Fails with [`FormatError::MissingImages`] when the document has no
    /// `images` array, before any other field is looked at.
    pub fn from_json(json: &str) -> Result<Self, FormatError> {
        let value: Value = serde_json::from_str(json)?;
        if !value.get("images").is_some_and(Value::is_array) {
            return Err(FormatError::MissingImages);
        }

        let version = value
            .get("version")
            .and_then(Value::as_u64)
            .unwrap_or(u64::from(Self::CURRENT_VERSION));
        if version > u64::from(Self::CURRENT_VERSION) {
            return Err(FormatError::VersionTooNew {
                found: u32::try_from(version).unwrap_or(u32::MAX),
                supported: Self::CURRENT_VERSION,
            });
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Shallow-merge this snapshot over `initial`.
    ///
    /// Every persisted field replaces the initial one; the result is idle and
    /// has no history. An out-of-range `selectedImage` falls back to the
    /// first image.
    pub fn merge_into(self, initial: AnnotationState) -> AnnotationState {
        let images: Vec<Image> = self.images.into_iter().map(Image::from).collect();
        let selected_image = match self.selected_image {
            Some(index) if index < images.len() => Some(index),
            _ if images.is_empty() => None,
            _ => Some(0),
        };

        AnnotationState {
            images,
            selected_image,
            breakouts: self.breakouts,
            categories: self.categories,
            device_list: self.device_list,
            categories_color_map: self.categories_color_map,
            selected_tool: self.selected_tool,
            show_tags: self.show_tags,
            mode: None,
            mouse_down_at: None,
            history: Vec::new(),
            ..initial
        }
    }

    pub fn region_count(&self) -> usize {
        self.images.iter().map(|i| i.regions.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Shape;

    fn sample_state() -> AnnotationState {
        let mut state = AnnotationState::new(vec![
            Image::new("a.png", "A")
                .with_pixel_size(800, 600)
                .with_regions(vec![Region::new("r1", Shape::Point { x: 0.2, y: 0.3 })]),
            Image::new("b.png", "B"),
        ]);
        state.selected_image = Some(1);
        state.categories = vec!["Lighting".to_string()];
        state
            .categories_color_map
            .insert("Lighting".to_string(), "#FFFF00".to_string());
        state.device_list = vec![Device::builtin("d1", "L1", "Lighting")];
        state.selected_tool = Tool::CreateBox;
        state
    }

    #[test]
    fn test_projection_uses_camel_case() {
        let json = PersistedState::from_state(&sample_state())
            .to_json()
            .expect("serialize");
        let value: Value = serde_json::from_str(&json).expect("json");

        assert_eq!(value["selectedImage"], 1);
        assert_eq!(value["selectedTool"], "create-box");
        assert_eq!(value["categoriesColorMap"]["Lighting"], "#FFFF00");
        assert_eq!(value["deviceList"][0]["symbolName"], "L1");
        assert!(value.get("history").is_none());
        assert!(value.get("mode").is_none());
        assert!(value["images"][0].get("pixelSize").is_none());
    }

    #[test]
    fn test_reload_merges_over_initial_state() {
        let mut saved = sample_state();
        saved.images[0].regions[0].highlighted = true;
        let json = PersistedState::from_state(&saved)
            .to_json()
            .expect("serialize");

        let mut initial = AnnotationState::new(Vec::new());
        initial.region_cls_list = vec!["L1".to_string()];
        let restored = PersistedState::from_json(&json)
            .expect("parse")
            .merge_into(initial);

        assert_eq!(restored.images.len(), 2);
        assert_eq!(restored.images[0].regions, saved.images[0].regions);
        assert_eq!(restored.images[0].pixel_size, None);
        assert_eq!(restored.selected_image, Some(1));
        assert_eq!(restored.selected_tool, Tool::CreateBox);
        assert_eq!(restored.region_cls_list, vec!["L1".to_string()]);
        assert_eq!(restored.mode, None);
        assert!(restored.history.is_empty());
    }

    #[test]
    fn test_missing_images_is_rejected() {
        assert!(matches!(
            PersistedState::from_json(r#"{"categories":[]}"#),
            Err(FormatError::MissingImages)
        ));
        assert!(matches!(
            PersistedState::from_json(r#"{"images":{}}"#),
            Err(FormatError::MissingImages)
        ));
        assert!(matches!(
            PersistedState::from_json("not json"),
            Err(FormatError::Json(_))
        ));
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let result = PersistedState::from_json(r#"{"version":99,"images":[]}"#);
        match result {
            Err(FormatError::VersionTooNew { found, supported }) => {
                assert_eq!(found, 99);
                assert_eq!(supported, PersistedState::CURRENT_VERSION);
            }
            other => panic!("Expected VersionTooNew, got {:?}", other),
        }
    }

    #[test]
    fn test_minimal_snapshot_uses_defaults() {
        let state = PersistedState::from_json(r#"{"images":[{"src":"x.png"}]}"#).expect("parse");
        assert_eq!(state.version, 1);
        assert!(state.show_tags);
        assert_eq!(state.selected_tool, Tool::Select);

        let merged = state.merge_into(AnnotationState::default());
        assert_eq!(merged.selected_image, Some(0));
        assert_eq!(merged.images[0].src, "x.png");
    }
}
