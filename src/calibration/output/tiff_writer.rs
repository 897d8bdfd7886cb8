use std::io::Write;

use tracing::debug;

use crate::calibration::common::error::{CalibrationError, Result};
use crate::calibration::decode::types::ProjectionImage;
use crate::calibration::display::render::window_to_gray16;
use crate::calibration::display::types::DisplayWindow;
use crate::calibration::output::writer::ImageWriter;

/// TIFF-backed image writer.
///
/// Corrected arrays are stored as uncompressed 32-bit float grayscale so the
/// downstream stitching tools read exact intensities; previews use the same
/// log windowing as the interactive display, stored as 16-bit grayscale.
pub struct TiffImageWriter;

impl ImageWriter for TiffImageWriter {
    fn write_array(&self, image: &ProjectionImage, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding {}x{} float array", image.rows, image.cols);

        let samples: Vec<f32> = image.data.iter().map(|&v| v as f32).collect();

        let mut buffer = Vec::new();
        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| CalibrationError::EncodeError(e.to_string()))?;
        encoder
            .write_image::<tiff::encoder::colortype::Gray32Float>(
                image.cols as u32,
                image.rows as u32,
                &samples,
            )
            .map_err(|e| CalibrationError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("Array encoding complete, {} bytes", buffer.len());
        Ok(())
    }

    fn write_preview(
        &self,
        image: &ProjectionImage,
        window: DisplayWindow,
        output: &mut dyn Write,
    ) -> Result<()> {
        debug!("Encoding {}x{} preview", image.rows, image.cols);

        let samples = window_to_gray16(image, window);

        let mut buffer = Vec::new();
        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| CalibrationError::EncodeError(e.to_string()))?;
        encoder
            .write_image::<tiff::encoder::colortype::Gray16>(
                image.cols as u32,
                image.rows as u32,
                &samples,
            )
            .map_err(|e| CalibrationError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;
        Ok(())
    }
}
