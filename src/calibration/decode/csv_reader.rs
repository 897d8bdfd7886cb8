//! Projection reader for the delimited record streams written by the CZT
//! acquisition software.
//!
//! Each line of a raw file describes one pixel readout: a module identifier,
//! the pixel's row and column on the detector, and one column per energy
//! counter. The acquisition software repeats a module's records while the
//! readout settles, so consecutive records from the same module are collapsed
//! to a single contribution.

use tracing::debug;

use crate::calibration::common::error::{CalibrationError, Result};
use crate::calibration::decode::reader::ProjectionReader;
use crate::calibration::decode::types::{EnergyChannel, GridSize, ProjectionImage};

/// Leading field of the column-header line, skipped without decoding.
const HEADER_MARKER: &str = "Pixel";

const MODULE_FIELD: usize = 0;
const ROW_FIELD: usize = 2;
const COLUMN_FIELD: usize = 3;

/// Decodes delimited per-pixel record streams into projection images.
///
/// The reader is constructed with the detector's grid dimensions; every
/// decode produces an image of exactly those dimensions, zero-filled where
/// the stream carries no record.
pub struct DelimitedTextReader {
    grid: GridSize,
}

impl DelimitedTextReader {
    pub fn new(grid: GridSize) -> Self {
        Self { grid }
    }

    fn field<'a>(record: &'a csv::StringRecord, index: usize, line: u64) -> Result<&'a str> {
        record.get(index).ok_or_else(|| {
            CalibrationError::DecodeError(format!(
                "line {line}: record has {} fields, field {index} required",
                record.len()
            ))
        })
    }

    fn numeric_field(record: &csv::StringRecord, index: usize, line: u64) -> Result<f64> {
        let field = Self::field(record, index, line)?;
        field.trim().parse::<f64>().map_err(|_| {
            CalibrationError::DecodeError(format!(
                "line {line}: field {index} is not numeric: {field:?}"
            ))
        })
    }

    fn index_field(record: &csv::StringRecord, index: usize, line: u64) -> Result<usize> {
        let field = Self::field(record, index, line)?;
        field.trim().parse::<usize>().map_err(|_| {
            CalibrationError::DecodeError(format!(
                "line {line}: field {index} is not a pixel index: {field:?}"
            ))
        })
    }

    fn channel_value(
        record: &csv::StringRecord,
        channel: EnergyChannel,
        line: u64,
    ) -> Result<f64> {
        match channel.field_index() {
            Some(index) => Self::numeric_field(record, index, line),
            None => {
                // Derived difference channel, computed from two counters.
                let high = Self::channel_value(record, EnergyChannel::Cc4, line)?;
                let low = Self::channel_value(record, EnergyChannel::Cc3, line)?;
                Ok(high - low)
            }
        }
    }
}

impl ProjectionReader for DelimitedTextReader {
    /// Decodes one record stream into a projection image.
    ///
    /// This method:
    /// 1. Skips the column-header line (leading field `Pixel`)
    /// 2. Parses each record's row and column indices and the selected
    ///    channel's value
    /// 3. Accumulates the value at (row, column), suppressing all but the
    ///    first record of each contiguous same-module run
    ///
    /// Malformed numeric fields, truncated records, and pixel indices
    /// outside the configured grid are fatal and abort the decode.
    ///
    /// Duplicate suppression compares each record's module identifier only
    /// against the immediately preceding record. A later, non-adjacent run
    /// of the same module contributes again and its value adds onto the
    /// cell.
    fn read_projection(&self, data: &[u8], channel: EnergyChannel) -> Result<ProjectionImage> {
        debug!("Decoding record stream, {} bytes, channel {}", data.len(), channel);

        let mut image = ProjectionImage::zeros(self.grid);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data);

        // No real module identifier compares equal to None, so the first
        // data record always contributes.
        let mut previous_module: Option<String> = None;
        let mut line: u64 = 0;

        for result in reader.records() {
            let record = result.map_err(|e| CalibrationError::DecodeError(e.to_string()))?;
            line = record.position().map(|p| p.line()).unwrap_or(line + 1);

            let module = Self::field(&record, MODULE_FIELD, line)?;
            if module == HEADER_MARKER {
                continue;
            }

            let row = Self::index_field(&record, ROW_FIELD, line)?;
            let column = Self::index_field(&record, COLUMN_FIELD, line)?;
            if !image.in_bounds(row, column) {
                return Err(CalibrationError::PixelOutOfRange {
                    row,
                    col: column,
                    rows: image.rows,
                    cols: image.cols,
                });
            }

            let value = Self::channel_value(&record, channel, line)?;
            if previous_module.as_deref() != Some(module) {
                image.accumulate(row, column, value);
            }
            previous_module = Some(module.to_string());
        }

        debug!("Decoded {}x{} projection image", image.rows, image.cols);
        Ok(image)
    }
}
