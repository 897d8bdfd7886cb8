#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::calibration::decode::types::{GridSize, ProjectionImage};
    use crate::calibration::display::console_marker::collect_marks;
    use crate::calibration::display::marker::apply_display_mark;
    use crate::calibration::display::render::{render_text, window_to_gray16};
    use crate::calibration::display::types::DisplayWindow;
    use crate::calibration::repair::types::DefectMask;

    #[test]
    fn test_mark_rounds_to_nearest_cell() {
        let mut mask = DefectMask::new(GridSize::new(4, 4));

        assert!(apply_display_mark(&mut mask, 1.4, 2.6));
        assert!(mask.is_defective(3, 1));

        // Ties round away from zero.
        assert!(apply_display_mark(&mut mask, 0.5, 0.0));
        assert!(mask.is_defective(0, 1));
    }

    #[test]
    fn test_out_of_range_mark_is_ignored() {
        let mut mask = DefectMask::new(GridSize::new(4, 4));

        assert!(!apply_display_mark(&mut mask, 4.2, 0.0));
        assert!(!apply_display_mark(&mut mask, 0.0, -0.6));
        assert!(!apply_display_mark(&mut mask, -1.0, 1.0));
        assert_eq!(mask.defect_count(), 0);

        // Just inside after rounding.
        assert!(apply_display_mark(&mut mask, 3.4, -0.4));
        assert!(mask.is_defective(0, 3));
    }

    #[test]
    fn test_collect_marks_until_commit() {
        let mut mask = DefectMask::new(GridSize::new(4, 4));
        let input = Cursor::new("1 2\nnot a mark\n3 3\ndone\n9 9\n");

        let recorded = collect_marks(input, &mut mask).unwrap();

        assert_eq!(recorded, 2);
        assert!(mask.is_defective(2, 1));
        assert!(mask.is_defective(3, 3));
        // The mark after 'done' is never read.
        assert_eq!(mask.defect_count(), 2);
    }

    #[test]
    fn test_collect_marks_commits_on_eof() {
        let mut mask = DefectMask::new(GridSize::new(4, 4));
        let recorded = collect_marks(Cursor::new("0 0\n"), &mut mask).unwrap();
        assert_eq!(recorded, 1);
        assert!(mask.is_defective(0, 0));
    }

    #[test]
    fn test_render_text_shape_and_ramp() {
        let mut image = ProjectionImage::zeros(GridSize::new(2, 3));
        image.set(0, 0, 1e7);
        let window = DisplayWindow::default();

        let rendered = render_text(&image, window);
        let lines: Vec<&str> = rendered.lines().collect();

        // Header plus one line per row.
        assert_eq!(lines.len(), 3);
        // Saturated pixel renders as the brightest ramp character.
        assert!(lines[1].ends_with("@  "));
    }

    #[test]
    fn test_gray16_windowing_saturates_at_bounds() {
        let grid = GridSize::new(1, 3);
        let image = ProjectionImage::from_vec(grid, vec![0.0, 1e2, 1e7]).unwrap();
        let gray = window_to_gray16(&image, DisplayWindow::default());

        assert_eq!(gray[0], 0);
        assert_eq!(gray[1], 0);
        assert_eq!(gray[2], u16::MAX);
    }
}
