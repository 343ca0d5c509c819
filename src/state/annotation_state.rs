//! The root aggregate of the annotation document.

use std::collections::{BTreeMap, BTreeSet};

use crate::geometry::{Point, Rect};
use crate::history::HistoryEntry;
use crate::mode::Mode;
use crate::model::{Breakout, Device, Image, KeypointsDefinition, Region, Tool};

/// The full annotation document plus the editor's interaction state.
///
/// Every dispatch produces a new value; callers keep only the latest one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnotationState {
    /// Images (or video keyframes) in display order.
    pub images: Vec<Image>,
    /// Index of the image being edited.
    pub selected_image: Option<usize>,

    /// Known devices, newest first.
    pub device_list: Vec<Device>,
    /// Devices created in this session that still need to be persisted upstream.
    pub new_devices_to_save: Vec<Device>,
    /// Known categories.
    pub categories: Vec<String>,
    /// Categories created in this session that still need to be persisted upstream.
    pub new_categories_to_save: Vec<String>,
    /// Category name to `#RRGGBB` color.
    pub categories_color_map: BTreeMap<String, String>,
    /// Categories drawn dimmed; their regions are ignored by the eraser.
    pub dimmed_categories: BTreeSet<String>,

    pub breakouts: Vec<Breakout>,
    /// The breakout currently toggled visible, if any.
    pub selected_breakout_toggle: Option<String>,
    /// Breakout applied automatically to created and selected regions.
    pub pinned_breakout: Option<String>,

    pub keypoint_definitions: BTreeMap<String, KeypointsDefinition>,
    /// Classes offered to the operator.
    pub region_cls_list: Vec<String>,
    /// Last class picked by the operator.
    pub selected_cls: Option<String>,
    pub selected_tool: Tool,
    pub show_tags: bool,
    /// Pointer positions are clamped into this area before dispatch.
    pub allowed_area: Option<Rect>,

    /// Gesture in progress. None when idle.
    pub mode: Option<Mode>,
    /// Where the pointer went down, while it is held.
    pub mouse_down_at: Option<Point>,

    /// Undo snapshots, newest first.
    pub history: Vec<HistoryEntry>,
}

impl AnnotationState {
    /// Create a state holding the given images, with the first one selected.
    pub fn new(images: Vec<Image>) -> Self {
        Self {
            selected_image: if images.is_empty() { None } else { Some(0) },
            images,
            show_tags: true,
            ..Default::default()
        }
    }

    pub fn active_image(&self) -> Option<&Image> {
        self.images.get(self.selected_image?)
    }

    pub fn active_image_mut(&mut self) -> Option<&mut Image> {
        let index = self.selected_image?;
        self.images.get_mut(index)
    }

    /// Region with the given id on the active image.
    pub fn region(&self, id: &str) -> Option<&Region> {
        self.active_image()?.region(id)
    }

    pub fn region_mut(&mut self, id: &str) -> Option<&mut Region> {
        self.active_image_mut()?.region_mut(id)
    }

    /// Regions of the active image, or nothing when no image is selected.
    pub fn active_regions_mut(&mut self) -> impl Iterator<Item = &mut Region> {
        self.active_image_mut()
            .into_iter()
            .flat_map(|image| image.regions.iter_mut())
    }

    /// Every region of every image.
    pub fn all_regions(&self) -> impl Iterator<Item = &Region> {
        self.images.iter().flat_map(|image| image.regions.iter())
    }

    pub fn all_regions_mut(&mut self) -> impl Iterator<Item = &mut Region> {
        self.images
            .iter_mut()
            .flat_map(|image| image.regions.iter_mut())
    }

    pub fn device(&self, symbol_name: &str) -> Option<&Device> {
        self.device_list
            .iter()
            .find(|d| d.symbol_name == symbol_name)
    }

    pub fn breakout(&self, id: &str) -> Option<&Breakout> {
        self.breakouts.iter().find(|b| b.id == id)
    }

    pub fn is_dimmed(&self, region: &Region) -> bool {
        self.dimmed_categories.contains(&region.category)
    }

    /// A copy of this state with an empty history, as stored in snapshots.
    pub fn without_history(&self) -> Self {
        Self {
            history: Vec::new(),
            ..self.clone()
        }
    }
}
