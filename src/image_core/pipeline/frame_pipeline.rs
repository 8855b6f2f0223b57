use tracing::{info, instrument};

use crate::image_core::calibration::{CalibrationCache, CalibrationKey, CalibrationProvider};
use crate::image_core::common::error::{ImageError, Result};
use crate::image_core::distortion::{self, PixelCoord, RayDirection};
use crate::image_core::frame::{FramePool, ImageHandle, RawFrame};
use crate::image_core::pipeline::config::PipelineConfig;

/// Producer-facing orchestrator for one device connection.
///
/// Owns the frame pool, the per-connection calibration cache, and the
/// provider seam to the driver layer. The producing thread publishes frames
/// through it; consumers hold the returned [`ImageHandle`]s.
pub struct FramePipeline<P: CalibrationProvider> {
    provider: P,
    cache: CalibrationCache,
    pool: FramePool,
    device_id: u32,
    config: PipelineConfig,
}

impl<P: CalibrationProvider> std::fmt::Debug for FramePipeline<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FramePipeline")
            .field("device_id", &self.device_id)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<P: CalibrationProvider> FramePipeline<P> {
    pub fn new(provider: P, connection_id: u32, device_id: u32, config: PipelineConfig) -> Result<Self> {
        if config.slots == 0 {
            return Err(ImageError::EmptyPool);
        }
        Ok(Self {
            provider,
            cache: CalibrationCache::new(connection_id),
            pool: FramePool::new(config.slots),
            device_id,
            config,
        })
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension
            && (width > max || height > max)
        {
            return Err(ImageError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    /// Validates the frame, resolves its calibration matrix through the
    /// cache, writes it into the next pool slot, and returns a handle.
    #[instrument(skip(self, frame), fields(frame_id = frame.frame_id))]
    pub fn publish(&mut self, frame: RawFrame) -> Result<ImageHandle> {
        self.validate_dimensions(frame.width as usize, frame.height as usize)?;

        let expected = frame.expected_len();
        if frame.pixels.len() != expected {
            return Err(ImageError::BufferSizeMismatch {
                expected,
                actual: frame.pixels.len(),
            });
        }

        let calibration = {
            let _span = tracing::info_span!("resolve_calibration").entered();
            let key = CalibrationKey::from_parts(self.device_id, frame.perspective);
            self.cache.get(key, &self.provider)?
        };

        let handle = self.pool.publish(frame, Some(calibration));
        Ok(handle)
    }

    /// Distortion-corrects a ray direction against a handle's frame, using
    /// the frame's own dimensions as the target. `None` when the handle is
    /// stale or carries no calibration.
    pub fn warp(&self, handle: &ImageHandle, ray: RayDirection) -> Option<PixelCoord> {
        if !handle.is_valid() {
            return None;
        }
        let matrix = handle.distortion_grid()?;
        let (width, height) = (handle.width() as f32, handle.height() as f32);
        Some(distortion::warp(ray, width, height, &matrix))
    }

    /// Converts a pixel coordinate in a handle's frame to the corrected ray
    /// direction. `None` when the handle is stale or carries no
    /// calibration.
    pub fn rectify(&self, handle: &ImageHandle, uv: PixelCoord) -> Option<RayDirection> {
        if !handle.is_valid() {
            return None;
        }
        let matrix = handle.distortion_grid()?;
        let (width, height) = (handle.width() as f32, handle.height() as f32);
        Some(distortion::rectify(uv, &matrix, width, height))
    }

    /// Drops the cached calibration matrices. Called when the connection
    /// closes; the pipeline must not be used for this connection afterward.
    pub fn close(&mut self) {
        info!(connection = self.cache.connection_id(), "Closing frame pipeline");
        self.cache.clear();
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn cached_matrices(&self) -> usize {
        self.cache.len()
    }
}
