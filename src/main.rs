use czt_fieldcal_rs::calibration::{
    CalibrationSession, DisplayWindow, EnergyChannel, SessionConfig,
};
use czt_fieldcal_rs::logger;

use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting CZT field calibration...");

    // Reference scans (air fields + dark field) and projection data live in
    // fixed directories; adjust these for the beamline layout in use.
    let config = SessionConfig::builder()
        .channels(vec![EnergyChannel::Ec])
        .reference_dir("data/reference")
        .air_files(vec![
            "air_0.5.csv".to_string(),
            "air_-18.5.csv".to_string(),
            "air_-9.csv".to_string(),
            "air_10.csv".to_string(),
        ])
        .dark_file("dark.csv")
        .projection_dir("data/projections")
        .window(DisplayWindow::new(1e2, 1e7))
        .save_previews(true)
        .build();
    let session = CalibrationSession::new(config);

    info!("Calibration session initialized");
    info!("Channels: {:?}", session.config().channels);
    info!(
        "Previews: {}",
        if session.config().save_previews {
            "enabled"
        } else {
            "disabled"
        }
    );

    match session.run() {
        Ok(summary) => info!(
            "Calibration successful, {} corrected arrays written",
            summary.projections_written()
        ),
        Err(e) => error!("Calibration failed: {}", e),
    }

    Ok(())
}
