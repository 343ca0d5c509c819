//! Action handlers.
//!
//! [`reduce`] is the general reducer: one match over [`Action`], delegating to
//! a handler per concern. Every handler mutates the working copy in place and
//! leaves it untouched when the action does not apply.

pub mod breakout;
mod create;
pub mod device;
pub mod image;
pub mod pointer;
pub mod region;

#[cfg(test)]
mod tests;

use crate::action::Action;
use crate::reducer::Env;
use crate::state::AnnotationState;

/// General reducer for everything but image selection and loading.
pub fn reduce(state: AnnotationState, action: &Action, env: &mut Env<'_>) -> AnnotationState {
    let mut state = state;

    match action {
        Action::MouseDown { x, y } => pointer::handle_mouse_down(&mut state, *x, *y, env),
        Action::MouseMove { x, y } => pointer::handle_mouse_move(&mut state, *x, *y),
        Action::MouseUp { x, y } => pointer::handle_mouse_up(&mut state, *x, *y, env),
        Action::Cancel => pointer::handle_cancel(&mut state),
        Action::SelectTool { selected_tool } => {
            pointer::handle_select_tool(&mut state, *selected_tool)
        }
        Action::SelectClassification { cls } => {
            log::debug!("Selected class {:?}", cls);
            state.selected_cls = cls.clone();
        }
        Action::SetAllowedArea { area } => state.allowed_area = *area,

        Action::SelectRegion { region } => region::handle_select(&mut state, &region.id),
        Action::ChangeRegion { region } => region::handle_change(&mut state, region, env),
        Action::ChangeRegionCategory { region, category } => {
            region::handle_change_category(&mut state, &region.id, category, env)
        }
        Action::DeleteRegion {
            region: Some(region),
        } => region::handle_delete(&mut state, &region.id),
        Action::DeleteRegion { region: None } | Action::DeleteSelectedRegion => {
            region::handle_delete_highlighted(&mut state)
        }
        Action::OpenRegionEditor { region } => region::handle_open_editor(&mut state, &region.id),
        Action::CloseRegionEditor { region } => {
            region::handle_close_editor(&mut state, &region.id)
        }
        Action::BeginMovePoint { point } => region::handle_begin_move(&mut state, &point.id),
        Action::BeginMoveRegion { region } => region::handle_begin_move(&mut state, &region.id),
        Action::BeginBoxTransform { region, directions } => {
            region::handle_begin_box_transform(&mut state, &region.id, *directions)
        }
        Action::BeginMovePolygonPoint {
            polygon,
            point_index,
        } => region::handle_begin_move_polygon_point(&mut state, &polygon.id, *point_index),
        Action::BeginMoveKeypoint {
            region,
            keypoint_id,
        } => region::handle_begin_move_keypoint(&mut state, &region.id, keypoint_id),
        Action::AddPolygonPoint {
            polygon,
            point,
            point_index,
        } => region::handle_add_polygon_point(&mut state, &polygon.id, *point, *point_index),
        Action::ClosePolygon { polygon } => region::handle_close_polygon(&mut state, &polygon.id),

        Action::AddNewDevice {
            symbol_name,
            category,
        } => device::handle_add_device(&mut state, symbol_name, category, env),
        Action::DeleteDeviceName { symbol_name } => {
            device::handle_delete_device(&mut state, symbol_name)
        }
        Action::BulkEditDeviceNameAndCategory {
            old_name,
            new_name,
            category,
        } => device::handle_bulk_edit(&mut state, old_name, new_name, category, env),
        Action::AddNewCategory { category, color } => {
            device::handle_add_category(&mut state, category, color.as_deref())
        }
        Action::ChangeCategoryColor { category, color } => {
            device::handle_change_category_color(&mut state, category, color)
        }
        Action::ToggleCategoryDimming { category } => {
            device::handle_toggle_dimming(&mut state, category)
        }
        Action::MarkDevicesSaved => state.new_devices_to_save.clear(),
        Action::MarkCategoriesSaved => state.new_categories_to_save.clear(),

        Action::AddNewBreakout { name, region } => {
            breakout::handle_add(&mut state, name, region.as_ref().map(|r| r.id.as_str()), env)
        }
        Action::AddNewBreakoutByCategory { category } => {
            breakout::handle_add_by_category(&mut state, category, env)
        }
        Action::ToggleBreakoutVisibility { breakout_id } => {
            breakout::handle_toggle_visibility(&mut state, breakout_id)
        }
        Action::DeleteBreakout { breakout_id } => breakout::handle_delete(&mut state, breakout_id),
        Action::RenameBreakout { breakout_id, name } => {
            breakout::handle_rename(&mut state, breakout_id, name)
        }
        Action::AssignBreakout {
            region,
            breakout_id,
        } => breakout::handle_assign(&mut state, &region.id, breakout_id.as_deref()),
        Action::PinBreakout { breakout_id } => {
            breakout::handle_pin(&mut state, breakout_id.as_deref())
        }

        // Handled by the image reducer and the history wrapper.
        Action::SelectImage { .. } | Action::ImageLoaded { .. } | Action::RestoreHistory => {}
    }

    state
}

/// Clear highlight and label-editor flags on the active image, except on `keep`.
fn clear_highlights(state: &mut AnnotationState, keep: Option<&str>) {
    for region in state.active_regions_mut() {
        if keep != Some(region.id.as_str()) {
            region.highlighted = false;
            region.editing_labels = false;
        }
    }
}

/// Put the region into the pinned breakout, if one is pinned.
fn apply_pinned_breakout(state: &mut AnnotationState, region_id: &str) {
    let Some(pinned) = state.pinned_breakout.clone() else {
        return;
    };
    if state.breakout(&pinned).is_none() {
        return;
    }
    if let Some(region) = state.region_mut(region_id) {
        region.breakout = Some(pinned);
    }
}
