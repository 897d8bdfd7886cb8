//! Projection image data types

use std::fmt;
use std::str::FromStr;

use crate::calibration::common::error::{CalibrationError, Result};

/// Grid dimensions of one detector module readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    /// Number of pixel rows
    pub rows: usize,
    /// Number of pixel columns
    pub cols: usize,
}

impl GridSize {
    /// Native CZT readout: 24 pixels high, 36 pixels wide.
    pub const CZT: GridSize = GridSize { rows: 24, cols: 36 };

    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::CZT
    }
}

/// One decoded projection: a 2-D grid of per-pixel intensities for a single
/// acquisition and energy channel, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionImage {
    /// Number of pixel rows
    pub rows: usize,
    /// Number of pixel columns
    pub cols: usize,
    /// Row-major intensity values, `rows * cols` entries
    pub data: Vec<f64>,
}

impl ProjectionImage {
    /// Zero-filled image of the given dimensions.
    pub fn zeros(grid: GridSize) -> Self {
        Self {
            rows: grid.rows,
            cols: grid.cols,
            data: vec![0.0; grid.cell_count()],
        }
    }

    /// Wraps an existing row-major buffer. The buffer length must match the
    /// grid dimensions.
    pub fn from_vec(grid: GridSize, data: Vec<f64>) -> Result<Self> {
        if data.len() != grid.cell_count() {
            return Err(CalibrationError::DecodeError(format!(
                "buffer of {} values cannot fill a {}x{} grid",
                data.len(),
                grid.rows,
                grid.cols
            )));
        }
        Ok(Self {
            rows: grid.rows,
            cols: grid.cols,
            data,
        })
    }

    pub fn size(&self) -> GridSize {
        GridSize::new(self.rows, self.cols)
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    pub(crate) fn accumulate(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] += value;
    }

    /// Elementwise subtraction of another image of identical dimensions.
    pub fn subtract(&mut self, other: &ProjectionImage) -> Result<()> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(CalibrationError::DimensionMismatch {
                left_rows: self.rows,
                left_cols: self.cols,
                right_rows: other.rows,
                right_cols: other.cols,
            });
        }
        for (value, reference) in self.data.iter_mut().zip(&other.data) {
            *value -= reference;
        }
        Ok(())
    }
}

/// Selects which of the simultaneously recorded per-pixel quantities a
/// decode extracts.
///
/// The acquisition software writes one column per counter: the total-counts
/// channel `EC`, six charge-corrected bins `CC0`..`CC5`, six secondary bins
/// `SEC0`..`SEC5`, and the bin sum `SUMCC`. `KEdge` is a derived channel,
/// the difference of the `CC4` and `CC3` counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyChannel {
    Ec,
    Cc0,
    Cc1,
    Cc2,
    Cc3,
    Cc4,
    Cc5,
    Sec0,
    Sec1,
    Sec2,
    Sec3,
    Sec4,
    Sec5,
    SumCc,
    KEdge,
}

impl EnergyChannel {
    /// Column of this channel in a raw record, or `None` for derived
    /// channels with no dedicated column.
    pub fn field_index(&self) -> Option<usize> {
        match self {
            EnergyChannel::Ec => Some(5),
            EnergyChannel::Cc5 => Some(6),
            EnergyChannel::Cc4 => Some(7),
            EnergyChannel::Cc3 => Some(8),
            EnergyChannel::Cc2 => Some(9),
            EnergyChannel::Cc1 => Some(10),
            EnergyChannel::Cc0 => Some(11),
            EnergyChannel::Sec5 => Some(12),
            EnergyChannel::Sec4 => Some(13),
            EnergyChannel::Sec3 => Some(14),
            EnergyChannel::Sec2 => Some(15),
            EnergyChannel::Sec1 => Some(16),
            EnergyChannel::Sec0 => Some(17),
            EnergyChannel::SumCc => Some(18),
            EnergyChannel::KEdge => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EnergyChannel::Ec => "EC",
            EnergyChannel::Cc0 => "CC0",
            EnergyChannel::Cc1 => "CC1",
            EnergyChannel::Cc2 => "CC2",
            EnergyChannel::Cc3 => "CC3",
            EnergyChannel::Cc4 => "CC4",
            EnergyChannel::Cc5 => "CC5",
            EnergyChannel::Sec0 => "SEC0",
            EnergyChannel::Sec1 => "SEC1",
            EnergyChannel::Sec2 => "SEC2",
            EnergyChannel::Sec3 => "SEC3",
            EnergyChannel::Sec4 => "SEC4",
            EnergyChannel::Sec5 => "SEC5",
            EnergyChannel::SumCc => "SUMCC",
            EnergyChannel::KEdge => "Kedge",
        }
    }
}

impl fmt::Display for EnergyChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EnergyChannel {
    type Err = CalibrationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "EC" => Ok(EnergyChannel::Ec),
            "CC0" => Ok(EnergyChannel::Cc0),
            "CC1" => Ok(EnergyChannel::Cc1),
            "CC2" => Ok(EnergyChannel::Cc2),
            "CC3" => Ok(EnergyChannel::Cc3),
            "CC4" => Ok(EnergyChannel::Cc4),
            "CC5" => Ok(EnergyChannel::Cc5),
            "SEC0" => Ok(EnergyChannel::Sec0),
            "SEC1" => Ok(EnergyChannel::Sec1),
            "SEC2" => Ok(EnergyChannel::Sec2),
            "SEC3" => Ok(EnergyChannel::Sec3),
            "SEC4" => Ok(EnergyChannel::Sec4),
            "SEC5" => Ok(EnergyChannel::Sec5),
            "SUMCC" => Ok(EnergyChannel::SumCc),
            "Kedge" => Ok(EnergyChannel::KEdge),
            other => Err(CalibrationError::UnknownChannel(other.to_string())),
        }
    }
}
