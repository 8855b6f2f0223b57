//! Image core module
//!
//! This module provides the tracking camera's image surface, with separate
//! modules for calibration data, lens distortion correction, pooled frame
//! storage, and the frame pipeline orchestration.

pub mod calibration;
pub mod common;
pub mod distortion;
pub mod frame;
pub mod pipeline;

pub use common::{
    ImageError,
    Result,
};

pub use calibration::{
    CalibrationCache,
    CalibrationKey,
    CalibrationMatrix,
    CalibrationProvider,
};

pub use distortion::{
    PixelCoord,
    RayDirection,
    rectify,
    warp,
};

pub use frame::{
    FramePool,
    ImageFormat,
    ImageHandle,
    Perspective,
    RawFrame,
};

pub use pipeline::{
    FramePipeline,
    PipelineConfig,
    PipelineConfigBuilder,
};
