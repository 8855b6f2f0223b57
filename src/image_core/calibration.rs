//! Calibration data module
//!
//! This module provides the per-device calibration grid type, the provider
//! seam to the device driver layer, and the per-connection matrix cache.

mod cache;
mod provider;
pub mod types;

pub use cache::CalibrationCache;
pub use provider::CalibrationProvider;
pub use types::{CalibrationKey, CalibrationMatrix, GRID_CHANNELS, GRID_LEN, GRID_SIZE};
