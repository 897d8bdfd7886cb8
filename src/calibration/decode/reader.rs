use crate::calibration::common::error::Result;
use crate::calibration::decode::types::{EnergyChannel, ProjectionImage};

pub trait ProjectionReader {
    fn read_projection(&self, data: &[u8], channel: EnergyChannel) -> Result<ProjectionImage>;
}
