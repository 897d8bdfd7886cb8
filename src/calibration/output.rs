//! Array output module
//!
//! Serialization of corrected projection images and of reference-field
//! previews.

pub(crate) mod writer;
pub(crate) mod tiff_writer;

#[cfg(test)]
mod tests;

pub use tiff_writer::TiffImageWriter;
pub use writer::ImageWriter;
