use crate::image_core::calibration::types::{CalibrationKey, CalibrationMatrix};
use crate::image_core::common::error::Result;

/// Seam to the device driver layer that supplies calibration data.
///
/// Implementations return [`ImageError::MissingCalibration`](crate::image_core::ImageError::MissingCalibration)
/// when the device has no matrix for the requested key; the cache surfaces
/// that failure unchanged.
pub trait CalibrationProvider {
    fn load(&self, connection_id: u32, key: CalibrationKey) -> Result<CalibrationMatrix>;
}
