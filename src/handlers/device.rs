//! Device and category actions.

use crate::history::{discard_latest, save_to_history};
use crate::reducer::Env;
use crate::resolver;
use crate::state::AnnotationState;

const BULK_EDIT: &str = "Bulk Edit Device Name and Category";

pub fn handle_add_device(
    state: &mut AnnotationState,
    symbol_name: &str,
    category: &str,
    env: &mut Env<'_>,
) {
    if symbol_name.trim().is_empty() {
        log::warn!("Ignoring device with an empty name");
        return;
    }
    resolver::register_category(state, category, None);

    if state.device(symbol_name).is_some_and(|d| d.user_defined) {
        resolver::change_device_category(state, symbol_name, category);
    } else {
        resolver::register_device(state, env, symbol_name, category);
    }
}

pub fn handle_delete_device(state: &mut AnnotationState, symbol_name: &str) {
    if !resolver::remove_device(state, symbol_name) {
        log::warn!("Cannot delete unknown device '{}'", symbol_name);
    }
}

/// Rename a device and recategorize it across every image.
pub fn handle_bulk_edit(
    state: &mut AnnotationState,
    old_name: &str,
    new_name: &str,
    category: &str,
    env: &mut Env<'_>,
) {
    if new_name.trim().is_empty() {
        log::warn!("Ignoring rename of '{}' to an empty name", old_name);
        return;
    }

    save_to_history(state, BULK_EDIT, env);
    if !resolver::rename_device(state, env, old_name, new_name, category) {
        discard_latest(state, BULK_EDIT);
    }
}

pub fn handle_add_category(state: &mut AnnotationState, category: &str, color: Option<&str>) {
    if !resolver::register_category(state, category, color) {
        log::debug!("Category '{}' already known", category);
    }
}

pub fn handle_change_category_color(state: &mut AnnotationState, category: &str, color: &str) {
    if resolver::set_category_color(state, category, color) {
        log::debug!("🎨 Category '{}' color set to {}", category, color);
    }
}

/// Dim or undim a category. Dimmed regions are skipped by the eraser.
pub fn handle_toggle_dimming(state: &mut AnnotationState, category: &str) {
    if !state.dimmed_categories.remove(category) {
        state.dimmed_categories.insert(category.to_string());
    }
    log::debug!(
        "Category '{}' dimmed: {}",
        category,
        state.dimmed_categories.contains(category)
    );
}
