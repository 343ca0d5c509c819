//! Breakout grouping.
//!
//! A breakout is a named group of regions shown on its own. At most one
//! breakout is toggled visible at a time; while one is, regions of other
//! breakouts are hidden.

use crate::model::Breakout;
use crate::reducer::Env;
use crate::state::AnnotationState;

/// Create a breakout, optionally putting one region of the active image in it.
pub fn handle_add(state: &mut AnnotationState, name: &str, region_id: Option<&str>, env: &mut Env<'_>) {
    if let Some(id) = region_id {
        if state.region(id).is_none() {
            log::warn!("Cannot add unknown region '{}' to a breakout", id);
            return;
        }
    }

    let breakout = Breakout::new(env.next_id(), name);
    if let Some(id) = region_id {
        if let Some(region) = state.region_mut(id) {
            region.breakout = Some(breakout.id.clone());
        }
    }
    log::debug!("🧩 Added breakout '{}' ({})", name, breakout.id);
    state.breakouts.push(breakout);
}

/// Create a breakout holding every region of `category`, on every image.
pub fn handle_add_by_category(state: &mut AnnotationState, category: &str, env: &mut Env<'_>) {
    let breakout = Breakout::new(env.next_id(), category);
    let mut count = 0;
    for region in state.all_regions_mut() {
        if region.category == category {
            region.breakout = Some(breakout.id.clone());
            count += 1;
        }
    }
    log::debug!("🧩 Added breakout '{}' with {} regions", category, count);
    state.breakouts.push(breakout);
}

/// Show only the toggled breakout, or everything once no breakout is shown.
pub fn handle_toggle_visibility(state: &mut AnnotationState, breakout_id: &str) {
    let Some(visible) = state.breakout(breakout_id).map(|b| !b.visible) else {
        log::warn!("Cannot toggle unknown breakout '{}'", breakout_id);
        return;
    };

    for breakout in &mut state.breakouts {
        breakout.visible = breakout.id == breakout_id && visible;
    }
    state.selected_breakout_toggle = visible.then(|| breakout_id.to_string());

    let any_visible = state.breakouts.iter().any(|b| b.visible);
    for region in state.all_regions_mut() {
        region.visible = if !any_visible {
            true
        } else {
            match region.breakout.as_deref() {
                Some(id) if id == breakout_id => visible,
                Some(_) => false,
                None => region.visible,
            }
        };
    }
    log::debug!("🧩 Breakout '{}' visible: {}", breakout_id, visible);
}

/// Delete a breakout; its regions leave it and become visible.
pub fn handle_delete(state: &mut AnnotationState, breakout_id: &str) {
    if state.breakout(breakout_id).is_none() {
        log::warn!("Cannot delete unknown breakout '{}'", breakout_id);
        return;
    }
    state.breakouts.retain(|b| b.id != breakout_id);

    for region in state.all_regions_mut() {
        if region.breakout.as_deref() == Some(breakout_id) {
            region.breakout = None;
            region.visible = true;
        }
    }
    if state.selected_breakout_toggle.as_deref() == Some(breakout_id) {
        state.selected_breakout_toggle = None;
    }
    if state.pinned_breakout.as_deref() == Some(breakout_id) {
        state.pinned_breakout = None;
    }
    log::debug!("🗑️ Deleted breakout '{}'", breakout_id);
}

pub fn handle_rename(state: &mut AnnotationState, breakout_id: &str, name: &str) {
    match state.breakouts.iter_mut().find(|b| b.id == breakout_id) {
        Some(breakout) => breakout.name = name.to_string(),
        None => log::warn!("Cannot rename unknown breakout '{}'", breakout_id),
    }
}

/// Put a region in a breakout, or take it out with `None`.
pub fn handle_assign(state: &mut AnnotationState, region_id: &str, breakout_id: Option<&str>) {
    if let Some(id) = breakout_id {
        if state.breakout(id).is_none() {
            log::warn!("Cannot assign unknown breakout '{}'", id);
            return;
        }
    }
    match state.region_mut(region_id) {
        Some(region) => region.breakout = breakout_id.map(str::to_string),
        None => log::warn!("Cannot assign breakout to unknown region '{}'", region_id),
    }
}

/// Pin a breakout so new and selected regions join it.
pub fn handle_pin(state: &mut AnnotationState, breakout_id: Option<&str>) {
    if let Some(id) = breakout_id {
        if state.breakout(id).is_none() {
            log::warn!("Cannot pin unknown breakout '{}'", id);
            return;
        }
    }
    state.pinned_breakout = breakout_id.map(str::to_string);
}
