//! Terminal-based defect marking.
//!
//! Renders the image as a log-windowed intensity map on stdout and reads
//! mark coordinates from stdin, one `x y` pair per line. An empty line,
//! `done`, or end of input commits the review and lets the session advance.
//! There is no timeout; the session waits for the operator.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::calibration::common::error::Result;
use crate::calibration::decode::types::ProjectionImage;
use crate::calibration::display::marker::{DefectMarker, apply_display_mark};
use crate::calibration::display::render::render_text;
use crate::calibration::display::types::DisplayWindow;
use crate::calibration::repair::types::DefectMask;

pub struct ConsoleMarker {
    window: DisplayWindow,
}

impl ConsoleMarker {
    pub fn new(window: DisplayWindow) -> Self {
        Self { window }
    }
}

/// Reads mark lines until the input commits. Returns the number of marks
/// recorded. Lines that are not a coordinate pair are reported and skipped;
/// marks outside the grid are rejected inside [`apply_display_mark`].
pub fn collect_marks<R: BufRead>(input: R, mask: &mut DefectMask) -> Result<usize> {
    let mut recorded = 0usize;

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("done") {
            break;
        }

        let mut parts = trimmed.split_whitespace();
        let coords = (
            parts.next().and_then(|t| t.parse::<f64>().ok()),
            parts.next().and_then(|t| t.parse::<f64>().ok()),
        );
        match coords {
            (Some(x), Some(y)) => {
                if apply_display_mark(mask, x, y) {
                    debug!("Marked pixel near x={x:.2}, y={y:.2}");
                    recorded += 1;
                }
            }
            _ => {
                println!("Could not read a coordinate pair from {trimmed:?}, expected: x y");
            }
        }
    }

    Ok(recorded)
}

impl DefectMarker for ConsoleMarker {
    fn review(&self, image: &ProjectionImage, title: &str, mask: &mut DefectMask) -> Result<()> {
        println!();
        println!("=== {title} ===");
        print!("{}", render_text(image, self.window));
        println!("Enter bad pixels as: x y  (column row, display coordinates)");
        println!("Empty line or 'done' finishes this image.");
        io::stdout().flush()?;

        let stdin = io::stdin();
        let recorded = collect_marks(stdin.lock(), mask)?;

        info!(
            "Review of {title} done, {recorded} marks this image, {} flagged in total",
            mask.defect_count()
        );
        Ok(())
    }
}
