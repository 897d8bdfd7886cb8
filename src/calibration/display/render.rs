//! Log-windowed rendering of projection images
//!
//! Pure mappings from a grid plus a display window to a terminal intensity
//! map and to 16-bit gray preview data.

use crate::calibration::decode::types::ProjectionImage;
use crate::calibration::display::types::DisplayWindow;

/// Character ramp from dark to bright.
const RAMP: &[u8] = b" .:-=+*#%@";

/// Maps a pixel value into [0, 1] on a log scale between the window bounds.
/// Values at or below the lower bound map to 0, values at or above the
/// upper bound map to 1.
fn normalize(value: f64, window: DisplayWindow) -> f64 {
    let lo = window.min.max(f64::MIN_POSITIVE);
    let hi = window.max.max(lo * (1.0 + f64::EPSILON));
    if value <= lo {
        return 0.0;
    }
    if value >= hi {
        return 1.0;
    }
    (value.ln() - lo.ln()) / (hi.ln() - lo.ln())
}

/// Renders the image as a text intensity map with a column header and
/// per-row indices, one ramp character per pixel.
pub fn render_text(image: &ProjectionImage, window: DisplayWindow) -> String {
    let mut out = String::new();

    out.push_str("     ");
    for col in 0..image.cols {
        out.push((b'0' + (col % 10) as u8) as char);
    }
    out.push('\n');

    for row in 0..image.rows {
        out.push_str(&format!("{row:>3}| "));
        for col in 0..image.cols {
            let level = normalize(image.get(row, col), window);
            let index = (level * (RAMP.len() - 1) as f64).round() as usize;
            out.push(RAMP[index] as char);
        }
        out.push('\n');
    }

    out
}

/// Converts the image to row-major 16-bit gray samples with the same log
/// windowing as the text rendering.
pub fn window_to_gray16(image: &ProjectionImage, window: DisplayWindow) -> Vec<u16> {
    image
        .data
        .iter()
        .map(|&value| (normalize(value, window) * f64::from(u16::MAX)).round() as u16)
        .collect()
}
