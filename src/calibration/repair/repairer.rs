//! Whole-image repair pass over a defect mask

use tracing::debug;

use crate::calibration::common::error::{CalibrationError, Result};
use crate::calibration::decode::types::ProjectionImage;
use crate::calibration::repair::averager::neighbor_estimate;
use crate::calibration::repair::types::{DefectMask, RepairMode};

/// Overwrites every pixel flagged in `mask` with its neighbor estimate.
///
/// The weight mask is taken once, before the pass, so flagged pixels never
/// contribute to an average regardless of visiting order. What the averages
/// read depends on `mode`: [`RepairMode::Snapshot`] reads the pre-pass
/// image, [`RepairMode::Cascade`] reads the image as it is being rewritten,
/// in row-major order. A pixel with no usable neighbors becomes 0.
pub fn repair_bad_pixels(
    image: &mut ProjectionImage,
    mask: &DefectMask,
    mode: RepairMode,
) -> Result<()> {
    if image.rows != mask.rows || image.cols != mask.cols {
        return Err(CalibrationError::DimensionMismatch {
            left_rows: image.rows,
            left_cols: image.cols,
            right_rows: mask.rows,
            right_cols: mask.cols,
        });
    }

    let weights = mask.weight_mask();
    let coords = mask.defective_coords();
    debug!("Repairing {} flagged pixels ({:?})", coords.len(), mode);

    match mode {
        RepairMode::Snapshot => {
            let snapshot = image.clone();
            for (row, col) in coords {
                let estimate = neighbor_estimate(&snapshot, row, col, &weights);
                image.set(row, col, estimate);
            }
        }
        RepairMode::Cascade => {
            for (row, col) in coords {
                let estimate = neighbor_estimate(image, row, col, &weights);
                image.set(row, col, estimate);
            }
        }
    }

    Ok(())
}
