//! Device, category and color resolution.
//!
//! Keeps `cls -> category -> color` consistent for every region of every image
//! and tracks the devices and categories introduced in this session.

use crate::color_utils::{generated_color, normalize_hex};
use crate::constants::{DEFAULT_REGION_COLOR, NOT_CLASSIFIED};
use crate::model::{Device, Region};
use crate::reducer::Env;
use crate::state::AnnotationState;

/// Category of the device named `symbol_name`, or `NOT CLASSIFIED`.
pub fn category_by_symbol_name(state: &AnnotationState, symbol_name: &str) -> String {
    state
        .device(symbol_name)
        .map(|d| d.category.clone())
        .unwrap_or_else(|| NOT_CLASSIFIED.to_string())
}

/// Registered color of `category`, or the fallback color.
pub fn color_by_category(state: &AnnotationState, category: &str) -> String {
    state
        .categories_color_map
        .get(category)
        .cloned()
        .unwrap_or_else(|| DEFAULT_REGION_COLOR.to_string())
}

/// Set a region's category and color from its `cls`.
pub fn apply_classification(state: &AnnotationState, region: &mut Region) {
    region.category = match region.cls.as_deref() {
        Some(cls) => category_by_symbol_name(state, cls),
        None => NOT_CLASSIFIED.to_string(),
    };
    region.color = color_by_category(state, &region.category);
}

/// Make sure a category exists. Returns true when it was added.
///
/// New categories get a color from `color` when it is a valid hex color,
/// otherwise a generated one, and are queued for saving.
pub fn register_category(state: &mut AnnotationState, category: &str, color: Option<&str>) -> bool {
    if category.is_empty() || category == NOT_CLASSIFIED {
        return false;
    }
    if state.categories.iter().any(|c| c == category) {
        return false;
    }

    state.categories.push(category.to_string());
    state.new_categories_to_save.push(category.to_string());
    if !state.categories_color_map.contains_key(category) {
        let color = color
            .and_then(normalize_hex)
            .unwrap_or_else(|| generated_color(state.categories.len() - 1));
        state
            .categories_color_map
            .insert(category.to_string(), color);
    }
    log::debug!("🏷️ Registered category '{}'", category);
    true
}

/// Make sure a device named `symbol_name` exists.
///
/// Unknown symbols become user-defined devices at the head of the list and are
/// queued for saving. Known devices are left as they are, so regions resolve
/// from their recorded category. Returns true when a device was added.
pub fn register_device(
    state: &mut AnnotationState,
    env: &mut Env<'_>,
    symbol_name: &str,
    category: &str,
) -> bool {
    if state.device(symbol_name).is_some() {
        return false;
    }

    let device = Device::user_defined(env.next_id(), symbol_name, category);
    log::debug!("🔧 Registered device '{}' ({})", symbol_name, category);
    state.device_list.insert(0, device.clone());
    state.new_devices_to_save.push(device);
    true
}

/// Change a user-defined device's category in its record and pending save.
fn update_device_category(state: &mut AnnotationState, symbol_name: &str, category: &str) -> bool {
    let mut changed = false;
    for device in state
        .device_list
        .iter_mut()
        .chain(state.new_devices_to_save.iter_mut())
        .filter(|d| d.symbol_name == symbol_name && d.user_defined)
    {
        if device.category != category {
            device.category = category.to_string();
            changed = true;
        }
    }
    changed
}

/// Move a user-defined device to another category.
///
/// Every region in the document with this `cls` that still carried the old
/// category follows. Returns false for unknown and built-in devices.
pub fn change_device_category(state: &mut AnnotationState, symbol_name: &str, category: &str) -> bool {
    let Some(device) = state.device(symbol_name) else {
        return false;
    };
    if !device.user_defined {
        log::warn!("Category of built-in device '{}' cannot change", symbol_name);
        return false;
    }
    let old_category = device.category.clone();
    update_device_category(state, symbol_name, category);

    let color = color_by_category(state, category);
    let mut count = 0;
    for region in state.all_regions_mut() {
        if region.cls.as_deref() == Some(symbol_name) && region.category == old_category {
            region.category = category.to_string();
            region.color = color.clone();
            count += 1;
        }
    }
    log::debug!(
        "🔧 Device '{}' moved from '{}' to '{}' ({} regions)",
        symbol_name,
        old_category,
        category,
        count
    );
    true
}

/// Rename `old_name` to `new_name` under `category`, across the whole document.
///
/// Returns false when nothing could be changed.
pub fn rename_device(
    state: &mut AnnotationState,
    env: &mut Env<'_>,
    old_name: &str,
    new_name: &str,
    category: &str,
) -> bool {
    if old_name == new_name && state.device(old_name).is_some_and(|d| !d.user_defined) {
        log::warn!("Built-in device '{}' cannot be edited", old_name);
        return false;
    }

    register_category(state, category, None);

    let new_exists = state.device(new_name).is_some();
    let new_user_defined = state.device(new_name).is_some_and(|d| d.user_defined);
    let old_user_defined = state.device(old_name).is_some_and(|d| d.user_defined);

    if new_user_defined {
        update_device_category(state, new_name, category);
    } else if !new_exists && old_user_defined {
        for device in state
            .device_list
            .iter_mut()
            .chain(state.new_devices_to_save.iter_mut())
            .filter(|d| d.symbol_name == old_name)
        {
            device.symbol_name = new_name.to_string();
            device.category = category.to_string();
        }
        if !state.new_devices_to_save.iter().any(|d| d.symbol_name == new_name) {
            if let Some(device) = state.device(new_name).cloned() {
                state.new_devices_to_save.push(device);
            }
        }
    } else if !new_exists {
        let device = Device::user_defined(env.next_id(), new_name, category);
        state.device_list.insert(0, device.clone());
        state.new_devices_to_save.push(device);
    }

    let resolved_category = category_by_symbol_name(state, new_name);
    let color = color_by_category(state, &resolved_category);
    let mut count = 0;
    for region in state.all_regions_mut() {
        if region.cls.as_deref() == Some(old_name) || region.cls.as_deref() == Some(new_name) {
            region.cls = Some(new_name.to_string());
            region.category = resolved_category.clone();
            region.color = color.clone();
            count += 1;
        }
    }
    log::debug!(
        "🔧 Renamed device '{}' -> '{}' ({} regions)",
        old_name,
        new_name,
        count
    );
    true
}

/// Remove a device and declassify its regions. Returns false for unknown names.
pub fn remove_device(state: &mut AnnotationState, symbol_name: &str) -> bool {
    if state.device(symbol_name).is_none() {
        return false;
    }
    state.device_list.retain(|d| d.symbol_name != symbol_name);
    state
        .new_devices_to_save
        .retain(|d| d.symbol_name != symbol_name);

    for region in state.all_regions_mut() {
        if region.cls.as_deref() == Some(symbol_name) {
            region.cls = None;
            region.category = NOT_CLASSIFIED.to_string();
            region.color = DEFAULT_REGION_COLOR.to_string();
        }
    }
    log::debug!("🗑️ Removed device '{}'", symbol_name);
    true
}

/// Set a category's color and repaint its regions. Returns false for invalid colors.
pub fn set_category_color(state: &mut AnnotationState, category: &str, color: &str) -> bool {
    let Some(color) = normalize_hex(color) else {
        log::warn!("Ignoring invalid color '{}' for '{}'", color, category);
        return false;
    };
    state
        .categories_color_map
        .insert(category.to_string(), color.clone());
    for region in state.all_regions_mut() {
        if region.category == category {
            region.color = color.clone();
        }
    }
    true
}
