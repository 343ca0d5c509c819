//! Image reducer.
//!
//! Runs before the general reducer and handles the actions that concern the
//! image list itself.

use crate::action::Action;
use crate::measurement::recompute_line_lengths;
use crate::model::PixelSize;
use crate::reducer::Env;
use crate::state::AnnotationState;

use super::create::discard_seed;

pub fn reduce(state: AnnotationState, action: &Action, _env: &mut Env<'_>) -> AnnotationState {
    let mut state = state;
    match action {
        Action::SelectImage { index } => handle_select_image(&mut state, *index),
        Action::ImageLoaded { width, height } => handle_image_loaded(&mut state, *width, *height),
        _ => {}
    }
    state
}

/// Switch to another image. A region still being drawn is discarded.
fn handle_select_image(state: &mut AnnotationState, index: usize) {
    if index >= state.images.len() {
        log::warn!("Cannot select image {} of {}", index, state.images.len());
        return;
    }
    if state.selected_image == Some(index) {
        return;
    }
    if let Some(mode) = state.mode.take() {
        if mode.is_drawing() {
            discard_seed(state, &mode);
        }
    }
    state.selected_image = Some(index);
    state.mouse_down_at = None;
    log::debug!("🖼️ Selected image {}", index);
}

/// Record the decoded size of the active image and measure its lines.
fn handle_image_loaded(state: &mut AnnotationState, width: u32, height: u32) {
    let Some(image) = state.active_image_mut() else {
        return;
    };
    image.pixel_size = Some(PixelSize {
        w: width,
        h: height,
    });
    recompute_line_lengths(image);
    log::debug!("🖼️ Loaded '{}' ({}x{})", image.name, width, height);
}
