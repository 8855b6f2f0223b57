use raytrack_rs::image_core::{
    CalibrationKey, CalibrationMatrix, CalibrationProvider, FramePipeline, ImageFormat,
    PipelineConfig, PixelCoord, RawFrame, RayDirection, Result,
};
use raytrack_rs::image_core::calibration::GRID_LEN;
use raytrack_rs::image_core::frame::Perspective;
use raytrack_rs::logger;

use tracing::{info, warn};

/// Stand-in for the device driver layer: serves a flat calibration grid
/// with the nominal ray factors for every key.
struct SyntheticProvider;

impl CalibrationProvider for SyntheticProvider {
    fn load(&self, _connection_id: u32, key: CalibrationKey) -> Result<CalibrationMatrix> {
        CalibrationMatrix::new(key, vec![0.5; GRID_LEN], 0.5, 0.5, 0.125, 0.125)
    }
}

fn synthetic_frame(frame_id: i64, perspective: Perspective) -> RawFrame {
    let (width, height) = (640u32, 480u32);
    let pixels = (0..width as usize * height as usize)
        .map(|i| (i % 251) as u8)
        .collect();
    RawFrame {
        pixels,
        width,
        height,
        bytes_per_pixel: 1,
        format: ImageFormat::Infrared,
        perspective,
        frame_id,
        timestamp: frame_id * 8_333,
    }
}

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting raytrack demo producer...");

    let config = PipelineConfig::builder().slots(4).build();
    let mut pipeline = FramePipeline::new(SyntheticProvider, 1, 42, config)?;

    info!("Frame pipeline initialized");
    info!("Pool slots: {}", pipeline.config().slots);

    let mut handles = Vec::new();
    for frame_id in 0..3 {
        for perspective in [Perspective::StereoLeft, Perspective::StereoRight] {
            let handle = pipeline.publish(synthetic_frame(frame_id, perspective))?;
            info!(
                frame_id,
                perspective_id = handle.perspective_id(),
                "Published {handle:?}"
            );
            handles.push(handle);
        }
    }
    info!("Calibration matrices cached: {}", pipeline.cached_matrices());

    if let Some(latest) = handles.last() {
        if let Some(center) = pipeline.warp(latest, RayDirection::new(0.0, 0.0)) {
            info!("Straight-ahead ray lands at pixel ({}, {})", center.x, center.y);
        }
        if let Some(ray) = pipeline.rectify(latest, PixelCoord::new(320.0, 240.0)) {
            info!("Image center rectifies to ray ({}, {})", ray.x, ray.y);
        }
    }

    // The pool holds 4 slots and 6 frames were published, so the earliest
    // handles now point at recycled slots.
    for (i, handle) in handles.iter().enumerate() {
        if !handle.is_valid() {
            warn!(
                "Handle {i} went stale: frame_id={}, bytes_per_pixel={}",
                handle.frame_id(),
                handle.bytes_per_pixel()
            );
        }
    }

    pipeline.close();
    info!("Done");
    Ok(())
}
