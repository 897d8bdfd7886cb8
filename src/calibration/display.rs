//! Image display and operator marking module
//!
//! Thin interactive glue around the pure calibration core: renders a
//! projection image for review and collects the operator's defect marks
//! into the session mask.

pub(crate) mod marker;
mod console_marker;
pub mod render;
pub mod types;

#[cfg(test)]
mod tests;

pub use console_marker::ConsoleMarker;
pub use marker::{DefectMarker, apply_display_mark};
pub use render::{render_text, window_to_gray16};
pub use types::DisplayWindow;
