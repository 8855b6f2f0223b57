//! Calibration grid types

use std::fmt;

use crate::image_core::common::error::{ImageError, Result};
use crate::image_core::frame::types::Perspective;

/// Calibration grid cells per side.
pub const GRID_SIZE: usize = 64;

/// Channels per grid cell (x, y).
pub const GRID_CHANNELS: usize = 2;

/// Total floats in a calibration grid: 64 rows x 64 cols x 2 channels.
pub const GRID_LEN: usize = GRID_SIZE * GRID_SIZE * GRID_CHANNELS;

/// Floats per grid row.
const GRID_ROW_STRIDE: usize = GRID_CHANNELS * GRID_SIZE;

/// Stable identifier for a calibration matrix.
///
/// Derived from the device id and the camera perspective; every image taken
/// from the same device and perspective shares one matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CalibrationKey(u64);

impl CalibrationKey {
    pub fn from_parts(device_id: u32, perspective: Perspective) -> Self {
        Self((u64::from(device_id) << 8) | perspective as u64)
    }

    /// Raw key value, for logging and diagnostics.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CalibrationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Per-device lens calibration data.
///
/// Holds a 64x64 grid of distortion-correction reference points, two floats
/// (x, y) per cell in row-major order, plus the four scalar factors that map
/// normalized `[0, 1]` grid values into the ray-slope range `[-4, 4]`.
/// Grid values outside `[0, 1]` mean "no corresponding image data".
///
/// Immutable once constructed; shared via `Arc` by all images from the same
/// device and perspective.
#[derive(Clone, Debug)]
pub struct CalibrationMatrix {
    key: CalibrationKey,
    grid: Box<[f32]>,
    ray_offset_x: f32,
    ray_offset_y: f32,
    ray_scale_x: f32,
    ray_scale_y: f32,
}

impl CalibrationMatrix {
    pub fn new(
        key: CalibrationKey,
        grid: Vec<f32>,
        ray_offset_x: f32,
        ray_offset_y: f32,
        ray_scale_x: f32,
        ray_scale_y: f32,
    ) -> Result<Self> {
        if grid.len() != GRID_LEN {
            return Err(ImageError::InvalidGridLength {
                expected: GRID_LEN,
                actual: grid.len(),
            });
        }
        Ok(Self {
            key,
            grid: grid.into_boxed_slice(),
            ray_offset_x,
            ray_offset_y,
            ray_scale_x,
            ray_scale_y,
        })
    }

    pub fn key(&self) -> CalibrationKey {
        self.key
    }

    /// Flat grid data, row-major, x-channel then y-channel per cell.
    pub fn grid(&self) -> &[f32] {
        &self.grid
    }

    pub fn ray_offset_x(&self) -> f32 {
        self.ray_offset_x
    }

    pub fn ray_offset_y(&self) -> f32 {
        self.ray_offset_y
    }

    pub fn ray_scale_x(&self) -> f32 {
        self.ray_scale_x
    }

    pub fn ray_scale_y(&self) -> f32 {
        self.ray_scale_y
    }

    /// Grid value at cell `(x, y)`, channel 0 (x) or 1 (y).
    ///
    /// Cell coordinates are clamped to the grid range, so neighbor lookups
    /// one past the last row or column read the edge cell instead.
    pub fn sample(&self, x: i64, y: i64, channel: usize) -> f32 {
        debug_assert!(channel < GRID_CHANNELS);
        let x = x.clamp(0, GRID_SIZE as i64 - 1) as usize;
        let y = y.clamp(0, GRID_SIZE as i64 - 1) as usize;
        self.grid[x * GRID_CHANNELS + y * GRID_ROW_STRIDE + channel]
    }
}
