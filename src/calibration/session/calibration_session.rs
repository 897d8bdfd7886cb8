use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::calibration::common::error::{CalibrationError, Result};
use crate::calibration::decode::{DelimitedTextReader, EnergyChannel, ProjectionImage, ProjectionReader};
use crate::calibration::display::{ConsoleMarker, DefectMarker};
use crate::calibration::output::{ImageWriter, TiffImageWriter};
use crate::calibration::repair::{DefectMask, repair_bad_pixels};
use crate::calibration::session::types::{ChannelSummary, SessionConfig, SessionSummary};

/// Drives a full calibration session.
///
/// One channel pass reviews every air-field scan and the dark field with the
/// operator, accumulating defect marks into a single mask, then repairs the
/// dark field and every projection with that mask, subtracts the corrected
/// dark field, and writes the corrected arrays next to the raw inputs.
///
/// Strictly sequential: each review blocks until the operator commits.
pub struct CalibrationSession<R: ProjectionReader, M: DefectMarker, W: ImageWriter> {
    reader: R,
    marker: M,
    writer: W,
    config: SessionConfig,
}

impl CalibrationSession<DelimitedTextReader, ConsoleMarker, TiffImageWriter> {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            reader: DelimitedTextReader::new(config.grid),
            marker: ConsoleMarker::new(config.window),
            writer: TiffImageWriter,
            config,
        }
    }
}

impl<R: ProjectionReader, M: DefectMarker, W: ImageWriter> CalibrationSession<R, M, W> {
    pub fn with_custom(reader: R, marker: M, writer: W, config: SessionConfig) -> Self {
        Self {
            reader,
            marker,
            writer,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[instrument(skip(self))]
    pub fn run(&self) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        for &channel in &self.config.channels {
            summary.channels.push(self.run_channel(channel)?);
        }
        Ok(summary)
    }

    /// One full pass for a single energy channel. The defect mask lives for
    /// exactly this pass; the next channel starts from a clean mask.
    #[instrument(skip(self, channel), fields(channel = %channel))]
    pub fn run_channel(&self, channel: EnergyChannel) -> Result<ChannelSummary> {
        info!("Starting calibration pass");

        let mut mask = DefectMask::new(self.config.grid);

        for air_file in &self.config.air_files {
            let _span = tracing::info_span!("review_air_field", file = %air_file).entered();
            let path = self.config.reference_dir.join(air_file);
            let image = self.decode_file(&path, channel)?;

            if self.config.save_previews {
                let stem = Path::new(air_file)
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| air_file.clone());
                self.write_preview(&image, &self.preview_path(&stem, channel))?;
            }

            let title = format!("open field: energy bin {channel}, {air_file}");
            self.marker.review(&image, &title, &mut mask)?;
        }

        let dark_path = self.config.reference_dir.join(&self.config.dark_file);
        let mut dark = {
            let _span = tracing::info_span!("decode_dark_field").entered();
            self.decode_file(&dark_path, channel)?
        };

        if self.config.save_previews {
            self.write_preview(&dark, &self.preview_path("darkfield", channel))?;
        }

        let title = format!("dark field projection: energy bin {channel}");
        self.marker.review(&dark, &title, &mut mask)?;

        // The dark field is subtracted from every projection, so it has to
        // be repaired with the finalized mask as well.
        repair_bad_pixels(&mut dark, &mask, self.config.repair_mode)?;
        info!("Mask finalized, {} pixels flagged", mask.defect_count());

        let projections =
            discover_projection_files(&self.config.projection_dir, &self.config.raw_extension)?;
        info!("Correcting {} projection files", projections.len());

        let mut written = 0usize;
        for path in &projections {
            let _span = tracing::info_span!("correct_projection", file = %path.display()).entered();

            let mut image = self.decode_file(path, channel)?;
            repair_bad_pixels(&mut image, &mask, self.config.repair_mode)?;
            image.subtract(&dark)?;

            let output_path = path.with_extension(&self.config.output_extension);
            self.write_array(&image, &output_path)?;
            written += 1;
        }

        info!(
            flagged = mask.defect_count(),
            written, "Calibration pass complete"
        );
        Ok(ChannelSummary {
            channel,
            flagged_pixels: mask.defect_count(),
            projections_written: written,
        })
    }

    fn decode_file(&self, path: &Path, channel: EnergyChannel) -> Result<ProjectionImage> {
        let data = fs::read(path).map_err(|e| {
            CalibrationError::InputReadError(format!("{}: {}", path.display(), e))
        })?;
        self.reader.read_projection(&data, channel)
    }

    fn write_array(&self, image: &ProjectionImage, path: &Path) -> Result<()> {
        let mut file = fs::File::create(path).map_err(|e| {
            CalibrationError::OutputWriteError(format!("{}: {}", path.display(), e))
        })?;
        self.writer.write_array(image, &mut file)
    }

    fn write_preview(&self, image: &ProjectionImage, path: &Path) -> Result<()> {
        let mut file = fs::File::create(path).map_err(|e| {
            CalibrationError::OutputWriteError(format!("{}: {}", path.display(), e))
        })?;
        self.writer.write_preview(image, self.config.window, &mut file)
    }

    fn preview_path(&self, stem: &str, channel: EnergyChannel) -> PathBuf {
        self.config.reference_dir.join(format!(
            "CZT_{stem}_{channel}.{}",
            self.config.output_extension
        ))
    }
}

/// Lists the raw projection files in `dir`, sorted by name so runs are
/// reproducible regardless of directory iteration order.
pub fn discover_projection_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| CalibrationError::InputReadError(format!("{}: {}", dir.display(), e)))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let matches = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if path.is_file() && matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
