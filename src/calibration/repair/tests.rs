#[cfg(test)]
mod tests {
    use crate::calibration::common::error::CalibrationError;
    use crate::calibration::decode::types::{GridSize, ProjectionImage};
    use crate::calibration::repair::averager::neighbor_estimate;
    use crate::calibration::repair::repairer::repair_bad_pixels;
    use crate::calibration::repair::types::{DefectMask, RepairMode};

    fn image_3x3(values: [[f64; 3]; 3]) -> ProjectionImage {
        let data: Vec<f64> = values.iter().flatten().copied().collect();
        ProjectionImage::from_vec(GridSize::new(3, 3), data).unwrap()
    }

    #[test]
    fn test_empty_mask_leaves_image_unchanged() {
        let mut image = image_3x3([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let original = image.clone();
        let mask = DefectMask::new(image.size());

        repair_bad_pixels(&mut image, &mask, RepairMode::Snapshot).unwrap();
        assert_eq!(image, original);
    }

    #[test]
    fn test_interior_pixel_averages_positive_neighbors() {
        // All 8 neighbors in bounds and good, three of them zero.
        let mut image = image_3x3([[5.0, 0.0, 7.0], [0.0, -1.0, 0.0], [3.0, 0.0, 9.0]]);
        let mut mask = DefectMask::new(image.size());
        mask.mark(1, 1);

        repair_bad_pixels(&mut image, &mask, RepairMode::Snapshot).unwrap();

        assert_eq!(image.get(1, 1), 6.0);
        // Everything else untouched.
        assert_eq!(image.get(0, 0), 5.0);
        assert_eq!(image.get(0, 2), 7.0);
        assert_eq!(image.get(2, 0), 3.0);
        assert_eq!(image.get(2, 2), 9.0);
        assert_eq!(image.get(0, 1), 0.0);
    }

    #[test]
    fn test_full_neighborhood_mean() {
        let mut image = image_3x3([[1.0, 2.0, 3.0], [4.0, 0.0, 5.0], [6.0, 7.0, 8.0]]);
        let mut mask = DefectMask::new(image.size());
        mask.mark(1, 1);

        repair_bad_pixels(&mut image, &mask, RepairMode::Snapshot).unwrap();
        assert_eq!(image.get(1, 1), 36.0 / 8.0);
    }

    #[test]
    fn test_corner_pixel_uses_three_neighbors() {
        let mut image = image_3x3([[0.0, 2.0, 0.0], [4.0, 6.0, 0.0], [0.0, 0.0, 0.0]]);
        let mut mask = DefectMask::new(image.size());
        mask.mark(0, 0);

        repair_bad_pixels(&mut image, &mask, RepairMode::Snapshot).unwrap();
        assert_eq!(image.get(0, 0), (2.0 + 4.0 + 6.0) / 3.0);
    }

    #[test]
    fn test_no_usable_neighbors_yields_zero() {
        // Center's neighbors are all flagged or read zero.
        let mut image = image_3x3([[5.0, 0.0, 7.0], [0.0, 9.0, 0.0], [3.0, 0.0, 9.0]]);
        let mut mask = DefectMask::new(image.size());
        mask.mark(1, 1);
        mask.mark(0, 0);
        mask.mark(0, 2);
        mask.mark(2, 0);
        mask.mark(2, 2);

        repair_bad_pixels(&mut image, &mask, RepairMode::Snapshot).unwrap();
        assert_eq!(image.get(1, 1), 0.0);
    }

    #[test]
    fn test_flagged_neighbors_excluded_from_average() {
        let mut image = image_3x3([[100.0, 2.0, 0.0], [4.0, 6.0, 0.0], [0.0, 0.0, 0.0]]);
        let mut mask = DefectMask::new(image.size());
        mask.mark(0, 0);
        mask.mark(0, 1);

        repair_bad_pixels(&mut image, &mask, RepairMode::Snapshot).unwrap();
        // (0,1) is flagged, so only (1,0) and (1,1) feed the corner.
        assert_eq!(image.get(0, 0), (4.0 + 6.0) / 2.0);
    }

    #[test]
    fn test_negative_candidates_do_not_count() {
        let mut image = image_3x3([[-5.0, -2.0, 0.0], [8.0, 6.0, 0.0], [0.0, 0.0, 0.0]]);
        let mask = DefectMask::new(image.size());
        let weights = mask.weight_mask();

        let estimate = neighbor_estimate(&image, 0, 0, &weights);
        assert_eq!(estimate, (8.0 + 6.0) / 2.0);

        image.set(1, 0, -8.0);
        image.set(1, 1, -6.0);
        assert_eq!(neighbor_estimate(&image, 0, 0, &weights), 0.0);
    }

    #[test]
    fn test_estimate_does_not_mutate_inputs() {
        let image = image_3x3([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let copy = image.clone();
        let weights = DefectMask::new(image.size()).weight_mask();

        neighbor_estimate(&image, 1, 1, &weights);
        assert_eq!(image, copy);
    }

    #[test]
    fn test_adjacent_defects_ignore_each_other() {
        // Two adjacent flagged pixels: the weight mask is taken before the
        // pass, so neither contributes to the other's average no matter the
        // visiting order or mode.
        let mut image = image_3x3([[0.0, 0.0, 4.0], [0.0, 0.0, 4.0], [4.0, 4.0, 4.0]]);
        let mut mask = DefectMask::new(image.size());
        mask.mark(0, 0);
        mask.mark(0, 1);

        repair_bad_pixels(&mut image, &mask, RepairMode::Snapshot).unwrap();

        // (0,0)'s good neighbors all read zero.
        assert_eq!(image.get(0, 0), 0.0);
        // (0,1) averages the good positive neighbors (0,2) and (1,2).
        assert_eq!(image.get(0, 1), 4.0);
    }

    #[test]
    fn test_snapshot_and_cascade_modes_agree() {
        // Only flagged coordinates are ever overwritten and the weight mask
        // already excludes all of them, so reading the live image instead of
        // a snapshot cannot change any estimate.
        let mut snapshot_img =
            image_3x3([[5.0, 0.0, 7.0], [2.0, 0.0, 0.0], [3.0, 1.0, 9.0]]);
        let mut cascade_img = snapshot_img.clone();

        let mut mask = DefectMask::new(snapshot_img.size());
        mask.mark(0, 0);
        mask.mark(0, 1);
        mask.mark(1, 1);
        mask.mark(2, 2);

        repair_bad_pixels(&mut snapshot_img, &mask, RepairMode::Snapshot).unwrap();
        repair_bad_pixels(&mut cascade_img, &mask, RepairMode::Cascade).unwrap();

        assert_eq!(snapshot_img, cascade_img);
    }

    #[test]
    fn test_dimension_mismatch_is_fatal() {
        let mut image = ProjectionImage::zeros(GridSize::new(3, 3));
        let mask = DefectMask::new(GridSize::new(2, 3));
        assert!(matches!(
            repair_bad_pixels(&mut image, &mask, RepairMode::Snapshot).unwrap_err(),
            CalibrationError::DimensionMismatch { .. }
        ));
    }

    #[test]
    fn test_weight_mask_is_complement() {
        let mut mask = DefectMask::new(GridSize::new(2, 2));
        mask.mark(0, 1);
        let weights = mask.weight_mask();

        assert_eq!(weights.weight(0, 0), 1.0);
        assert_eq!(weights.weight(0, 1), 0.0);
        assert_eq!(weights.weight(1, 0), 1.0);
        assert_eq!(weights.weight(1, 1), 1.0);
    }

    #[test]
    fn test_mask_reset_and_counts() {
        let mut mask = DefectMask::new(GridSize::new(2, 3));
        mask.mark(0, 0);
        mask.mark(1, 2);
        mask.mark(1, 2);

        assert_eq!(mask.defect_count(), 2);
        assert_eq!(mask.defective_coords(), vec![(0, 0), (1, 2)]);

        mask.reset();
        assert_eq!(mask.defect_count(), 0);
    }
}
