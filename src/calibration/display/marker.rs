use tracing::warn;

use crate::calibration::common::error::Result;
use crate::calibration::decode::types::ProjectionImage;
use crate::calibration::repair::types::DefectMask;

/// Operator review of one displayed image.
///
/// Implementations present `image` to the operator and block until the
/// review is acknowledged, recording any defect marks into `mask`.
/// Returning commits the mask state for this image; the session then
/// advances.
pub trait DefectMarker {
    fn review(&self, image: &ProjectionImage, title: &str, mask: &mut DefectMask) -> Result<()>;
}

/// Records one display-space mark into the mask.
///
/// The coordinate pair is in display space, `x` along columns and `y` along
/// rows, and is rounded to the nearest grid cell. A mark that rounds outside
/// the grid is rejected with a warning and leaves the mask untouched.
/// Returns whether the mark was recorded.
pub fn apply_display_mark(mask: &mut DefectMask, x: f64, y: f64) -> bool {
    let col = x.round();
    let row = y.round();

    if row < 0.0 || col < 0.0 || row >= mask.rows as f64 || col >= mask.cols as f64 {
        warn!(
            "Ignoring mark at ({x:.2}, {y:.2}): outside the {}x{} grid",
            mask.rows, mask.cols
        );
        return false;
    }

    mask.mark(row as usize, col as usize);
    true
}
