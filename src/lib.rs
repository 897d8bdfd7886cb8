//! Field calibration for the CZT photon-counting detector.
//!
//! Decodes raw per-pixel energy-bin readings into projection images, lets an
//! operator flag malfunctioning pixels on displayed reference fields, repairs
//! flagged pixels from their neighbors, and subtracts the corrected dark
//! field from every projection.

pub mod calibration;
pub mod logger;
