//! Nearest-neighbor estimation for a single pixel

use crate::calibration::decode::types::ProjectionImage;
use crate::calibration::repair::types::WeightMask;

/// Offsets of the 8 grid-adjacent neighbors.
const NEIGHBORHOOD: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Estimates a replacement value for the pixel at (row, col) from its up to
/// 8 in-bounds neighbors.
///
/// Each neighbor contributes its raw value scaled by its weight, 1 for good
/// pixels and 0 for flagged ones. The estimate is the arithmetic mean of the
/// strictly positive contributions; zeros, whether from weighting, true zero
/// readings, or missing neighbors at the grid border, are left out. With no
/// positive contribution at all the estimate is 0.
///
/// Inputs are not mutated.
pub fn neighbor_estimate(
    image: &ProjectionImage,
    row: usize,
    col: usize,
    weights: &WeightMask,
) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;

    for (dr, dc) in NEIGHBORHOOD {
        let r = row as i64 + dr;
        let c = col as i64 + dc;
        if r < 0 || c < 0 || r >= image.rows as i64 || c >= image.cols as i64 {
            continue;
        }
        let (r, c) = (r as usize, c as usize);
        let candidate = image.get(r, c) * weights.weight(r, c);
        if candidate > 0.0 {
            sum += candidate;
            count += 1;
        }
    }

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
