//! Lens distortion correction module
//!
//! This module provides the bidirectional mapping between raw pixel
//! coordinates and undistorted ray directions, driven by the per-device
//! calibration grid.

mod engine;
pub mod types;

pub use engine::{rectify, warp};
pub use types::{PixelCoord, RayDirection};
