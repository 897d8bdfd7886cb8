//! Calibration session configuration types

use std::path::PathBuf;

use crate::calibration::decode::types::{EnergyChannel, GridSize};
use crate::calibration::display::types::DisplayWindow;
use crate::calibration::repair::types::RepairMode;

/// Configuration for one calibration session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Detector grid dimensions
    pub grid: GridSize,
    /// Energy channels to calibrate; each gets a full pass with a fresh
    /// defect mask
    pub channels: Vec<EnergyChannel>,
    /// Directory holding the reference scans (air fields and dark field)
    pub reference_dir: PathBuf,
    /// Air-field scan filenames inside `reference_dir`
    pub air_files: Vec<String>,
    /// Dark-field scan filename inside `reference_dir`
    pub dark_file: String,
    /// Directory holding the raw projection data files
    pub projection_dir: PathBuf,
    /// Extension of the raw projection files
    pub raw_extension: String,
    /// Extension of the written array files
    pub output_extension: String,
    /// Intensity window for review displays and previews
    pub window: DisplayWindow,
    /// Whether to save preview images of the reference fields
    pub save_previews: bool,
    /// What a repair pass reads while overwriting flagged pixels
    pub repair_mode: RepairMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::CZT,
            channels: vec![EnergyChannel::Ec],
            reference_dir: PathBuf::from("."),
            air_files: Vec::new(),
            dark_file: "dark.csv".to_string(),
            projection_dir: PathBuf::from("."),
            raw_extension: "csv".to_string(),
            output_extension: "tiff".to_string(),
            window: DisplayWindow::default(),
            save_previews: false,
            repair_mode: RepairMode::default(),
        }
    }
}

impl SessionConfig {
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }
}

/// Builder for SessionConfig
#[derive(Default)]
pub struct SessionConfigBuilder {
    grid: Option<GridSize>,
    channels: Option<Vec<EnergyChannel>>,
    reference_dir: Option<PathBuf>,
    air_files: Option<Vec<String>>,
    dark_file: Option<String>,
    projection_dir: Option<PathBuf>,
    raw_extension: Option<String>,
    output_extension: Option<String>,
    window: Option<DisplayWindow>,
    save_previews: Option<bool>,
    repair_mode: Option<RepairMode>,
}

impl SessionConfigBuilder {
    pub fn grid(mut self, grid: GridSize) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn channels(mut self, channels: Vec<EnergyChannel>) -> Self {
        self.channels = Some(channels);
        self
    }

    pub fn reference_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.reference_dir = Some(dir.into());
        self
    }

    pub fn air_files(mut self, files: Vec<String>) -> Self {
        self.air_files = Some(files);
        self
    }

    pub fn dark_file(mut self, file: impl Into<String>) -> Self {
        self.dark_file = Some(file.into());
        self
    }

    pub fn projection_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.projection_dir = Some(dir.into());
        self
    }

    pub fn raw_extension(mut self, extension: impl Into<String>) -> Self {
        self.raw_extension = Some(extension.into());
        self
    }

    pub fn output_extension(mut self, extension: impl Into<String>) -> Self {
        self.output_extension = Some(extension.into());
        self
    }

    pub fn window(mut self, window: DisplayWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn save_previews(mut self, save: bool) -> Self {
        self.save_previews = Some(save);
        self
    }

    pub fn repair_mode(mut self, mode: RepairMode) -> Self {
        self.repair_mode = Some(mode);
        self
    }

    pub fn build(self) -> SessionConfig {
        let default = SessionConfig::default();
        SessionConfig {
            grid: self.grid.unwrap_or(default.grid),
            channels: self.channels.unwrap_or(default.channels),
            reference_dir: self.reference_dir.unwrap_or(default.reference_dir),
            air_files: self.air_files.unwrap_or(default.air_files),
            dark_file: self.dark_file.unwrap_or(default.dark_file),
            projection_dir: self.projection_dir.unwrap_or(default.projection_dir),
            raw_extension: self.raw_extension.unwrap_or(default.raw_extension),
            output_extension: self.output_extension.unwrap_or(default.output_extension),
            window: self.window.unwrap_or(default.window),
            save_previews: self.save_previews.unwrap_or(default.save_previews),
            repair_mode: self.repair_mode.unwrap_or(default.repair_mode),
        }
    }
}

/// Outcome of one energy-channel pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSummary {
    pub channel: EnergyChannel,
    /// Pixels flagged by the operator during this pass
    pub flagged_pixels: usize,
    /// Corrected arrays written
    pub projections_written: usize,
}

/// Outcome of a whole session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSummary {
    pub channels: Vec<ChannelSummary>,
}

impl SessionSummary {
    pub fn projections_written(&self) -> usize {
        self.channels.iter().map(|c| c.projections_written).sum()
    }
}
