use thiserror::Error;

use crate::image_core::calibration::CalibrationKey;

/// Failures surfaced by the image core.
///
/// Stale handles are deliberately absent from this taxonomy: accessors on a
/// recycled handle substitute documented default values instead of failing,
/// and callers gate on [`ImageHandle::is_valid`](crate::image_core::ImageHandle::is_valid)
/// before trusting any read.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("No calibration matrix for key {0}")]
    MissingCalibration(CalibrationKey),

    #[error("Invalid calibration grid length: expected {expected}, got {actual}")]
    InvalidGridLength { expected: usize, actual: usize },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("Frame pool must have at least one slot")]
    EmptyPool,
}

pub type Result<T> = std::result::Result<T, ImageError>;
