#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::calibration::decode::types::{GridSize, ProjectionImage};
    use crate::calibration::display::types::DisplayWindow;
    use crate::calibration::output::tiff_writer::TiffImageWriter;
    use crate::calibration::output::writer::ImageWriter;

    fn sample_image() -> ProjectionImage {
        let grid = GridSize::new(2, 3);
        ProjectionImage::from_vec(grid, vec![0.0, 1.5, -2.0, 1e3, 1e5, 1e7]).unwrap()
    }

    #[test]
    fn test_array_round_trips_through_tiff() {
        let image = sample_image();
        let mut output = Cursor::new(Vec::new());
        TiffImageWriter.write_array(&image, &mut output).unwrap();

        let mut decoder =
            tiff::decoder::Decoder::new(Cursor::new(output.into_inner())).unwrap();
        let (width, height) = decoder.dimensions().unwrap();
        assert_eq!((width, height), (3, 2));

        match decoder.read_image().unwrap() {
            tiff::decoder::DecodingResult::F32(samples) => {
                let expected: Vec<f32> = image.data.iter().map(|&v| v as f32).collect();
                assert_eq!(samples, expected);
            }
            _ => panic!("expected float samples"),
        }
    }

    #[test]
    fn test_preview_is_windowed_gray16() {
        let image = sample_image();
        let mut output = Cursor::new(Vec::new());
        TiffImageWriter
            .write_preview(&image, DisplayWindow::default(), &mut output)
            .unwrap();

        let mut decoder =
            tiff::decoder::Decoder::new(Cursor::new(output.into_inner())).unwrap();
        match decoder.read_image().unwrap() {
            tiff::decoder::DecodingResult::U16(samples) => {
                assert_eq!(samples.len(), 6);
                // Below the window floor and at the ceiling.
                assert_eq!(samples[0], 0);
                assert_eq!(samples[5], u16::MAX);
            }
            _ => panic!("expected u16 samples"),
        }
    }
}
