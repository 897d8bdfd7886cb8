use std::io::Write;

use crate::calibration::common::error::Result;
use crate::calibration::decode::types::ProjectionImage;
use crate::calibration::display::types::DisplayWindow;

pub trait ImageWriter {
    /// Writes the full-precision intensity array.
    fn write_array(&self, image: &ProjectionImage, output: &mut dyn Write) -> Result<()>;

    /// Writes a windowed visualization of the image. Lossy; for review only.
    fn write_preview(
        &self,
        image: &ProjectionImage,
        window: DisplayWindow,
        output: &mut dyn Write,
    ) -> Result<()>;
}
