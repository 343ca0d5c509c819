//! Scale-calibrated length measurement.
//!
//! A scale region's `cls` holds its real-world length in feet. The average
//! pixels-per-foot over every valid scale on an image converts line regions'
//! pixel length into `length_ft`.

use crate::model::{Image, PixelSize, Region, Shape};
use crate::state::AnnotationState;

/// Declared length of a scale region, when it is a positive number.
pub fn declared_feet(region: &Region) -> Option<f64> {
    let feet: f64 = region.cls.as_deref()?.trim().parse().ok()?;
    (feet.is_finite() && feet > 0.0).then_some(feet)
}

/// Pixel length of a segment given in normalized coordinates.
pub fn pixel_length(x1: f64, y1: f64, x2: f64, y2: f64, size: PixelSize) -> f64 {
    let dx = (x1 - x2) * f64::from(size.w);
    let dy = (y1 - y2) * f64::from(size.h);
    (dx * dx + dy * dy).sqrt()
}

/// Pixels per foot of one scale region. None for non-scales and invalid lengths.
pub fn pixels_per_foot(region: &Region, size: PixelSize) -> Option<f64> {
    let Shape::Scale { x1, y1, x2, y2 } = region.shape else {
        return None;
    };
    let feet = declared_feet(region)?;
    Some(pixel_length(x1, y1, x2, y2, size) / feet)
}

/// Mean pixels-per-foot over the image's valid scales, 0 when there are none.
pub fn average_scale(regions: &[Region], size: PixelSize) -> f64 {
    let scales: Vec<f64> = regions
        .iter()
        .filter_map(|r| pixels_per_foot(r, size))
        .collect();
    if scales.is_empty() {
        return 0.0;
    }
    scales.iter().sum::<f64>() / scales.len() as f64
}

/// Recompute `length_ft` of every line on the image.
///
/// Returns false when the image has no known pixel size yet; lines are left
/// untouched in that case.
pub fn recompute_line_lengths(image: &mut Image) -> bool {
    let Some(size) = image.pixel_size else {
        log::debug!("Skipping length recompute for '{}': size unknown", image.name);
        return false;
    };

    let average = average_scale(&image.regions, size);
    for region in &mut image.regions {
        if let Shape::Line {
            x1,
            y1,
            x2,
            y2,
            length_ft,
        } = &mut region.shape
        {
            let length = if average == 0.0 {
                0.0
            } else {
                pixel_length(*x1, *y1, *x2, *y2, size) / average
            };
            *length_ft = Some(length);
        }
    }
    log::debug!(
        "📏 Recomputed line lengths on '{}' ({:.3} px/ft)",
        image.name,
        average
    );
    true
}

/// Recompute line lengths on the active image.
pub fn recompute_active_image(state: &mut AnnotationState) {
    if let Some(image) = state.active_image_mut() {
        recompute_line_lengths(image);
    }
}
