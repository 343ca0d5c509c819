//! Color utility functions shared across the application.
//!
//! Region and category colors are stored as `#RRGGBB` strings. This module
//! validates user-supplied colors and generates distinct colors for new
//! categories.

/// Convert HSV to RGB.
///
/// # Arguments
/// * `h` - Hue in degrees (0-360)
/// * `s` - Saturation (0.0-1.0)
/// * `v` - Value/brightness (0.0-1.0)
///
/// # Returns
/// RGB tuple with values in range 0.0-1.0
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}

/// Format an RGB triple (0.0-1.0 channels) as `#RRGGBB`.
pub fn rgb_to_hex(r: f32, g: f32, b: f32) -> String {
    let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{:02X}{:02X}{:02X}", to_byte(r), to_byte(g), to_byte(b))
}

/// Generate a color for the n-th category.
///
/// Uses the golden angle so consecutive categories land far apart on the hue wheel.
pub fn generated_color(index: usize) -> String {
    let hue = (index as f32 * 137.5) % 360.0;
    let (r, g, b) = hsv_to_rgb(hue, 0.7, 0.9);
    rgb_to_hex(r, g, b)
}

/// Normalize a hex color to uppercase `#RRGGBB`.
///
/// Accepts `#RGB` and `#RRGGBB` (the leading `#` is optional).
/// Returns None for anything else.
pub fn normalize_hex(color: &str) -> Option<String> {
    let digits = color.trim().trim_start_matches('#');
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };
    Some(format!("#{}", expanded.to_ascii_uppercase()))
}
