#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::image_core::calibration::types::{CalibrationKey, CalibrationMatrix, GRID_LEN};
    use crate::image_core::calibration::CalibrationProvider;
    use crate::image_core::common::error::{ImageError, Result};
    use crate::image_core::distortion::{PixelCoord, RayDirection};
    use crate::image_core::frame::types::{ImageFormat, Perspective, RawFrame};
    use crate::image_core::pipeline::config::PipelineConfig;
    use crate::image_core::pipeline::FramePipeline;

    struct MockProvider {
        should_fail: bool,
        loads: Arc<AtomicUsize>,
    }

    impl MockProvider {
        fn new() -> (Self, Arc<AtomicUsize>) {
            let loads = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    should_fail: false,
                    loads: loads.clone(),
                },
                loads,
            )
        }

        fn failing() -> Self {
            Self {
                should_fail: true,
                loads: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl CalibrationProvider for MockProvider {
        fn load(&self, _connection_id: u32, key: CalibrationKey) -> Result<CalibrationMatrix> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.should_fail {
                return Err(ImageError::MissingCalibration(key));
            }
            CalibrationMatrix::new(key, vec![0.5; GRID_LEN], 0.5, 0.5, 0.125, 0.125)
        }
    }

    fn frame(frame_id: i64, perspective: Perspective) -> RawFrame {
        RawFrame {
            pixels: vec![0u8; 640 * 480],
            width: 640,
            height: 480,
            bytes_per_pixel: 1,
            format: ImageFormat::Infrared,
            perspective,
            frame_id,
            timestamp: frame_id * 8_333,
        }
    }

    #[test]
    fn publish_returns_a_valid_handle_with_calibration() {
        let (provider, _) = MockProvider::new();
        let mut pipeline =
            FramePipeline::new(provider, 1, 7, PipelineConfig::default()).unwrap();

        let handle = pipeline.publish(frame(1, Perspective::StereoLeft)).unwrap();

        assert!(handle.is_valid());
        assert_eq!(handle.width(), 640);
        assert!(handle.distortion_grid().is_some());
    }

    #[test]
    fn calibration_is_loaded_once_per_perspective() {
        let (provider, loads) = MockProvider::new();
        let mut pipeline =
            FramePipeline::new(provider, 1, 7, PipelineConfig::default()).unwrap();

        for id in 0..5 {
            pipeline.publish(frame(id, Perspective::StereoLeft)).unwrap();
            pipeline.publish(frame(id, Perspective::StereoRight)).unwrap();
        }

        assert_eq!(loads.load(Ordering::SeqCst), 2);
        assert_eq!(pipeline.cached_matrices(), 2);
    }

    #[test]
    fn provider_failure_surfaces_from_publish() {
        let mut pipeline =
            FramePipeline::new(MockProvider::failing(), 1, 7, PipelineConfig::default()).unwrap();

        let err = pipeline.publish(frame(1, Perspective::Mono)).unwrap_err();
        assert!(matches!(err, ImageError::MissingCalibration(_)));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let (provider, _) = MockProvider::new();
        let mut pipeline =
            FramePipeline::new(provider, 1, 7, PipelineConfig::default()).unwrap();

        let mut bad = frame(1, Perspective::Mono);
        bad.width = 0;
        bad.pixels.clear();

        let err = pipeline.publish(bad).unwrap_err();
        assert!(matches!(err, ImageError::InvalidDimensions(0, 480)));
    }

    #[test]
    fn oversized_dimensions_are_rejected_when_bounded() {
        let (provider, _) = MockProvider::new();
        let config = PipelineConfig::builder()
            .max_dimension(Some(512))
            .build();
        let mut pipeline = FramePipeline::new(provider, 1, 7, config).unwrap();

        let err = pipeline.publish(frame(1, Perspective::Mono)).unwrap_err();
        assert!(matches!(err, ImageError::InvalidDimensions(640, 480)));
    }

    #[test]
    fn dimension_validation_can_be_disabled() {
        let (provider, _) = MockProvider::new();
        let config = PipelineConfig::builder()
            .validate_dimensions(false)
            .max_dimension(Some(512))
            .build();
        let mut pipeline = FramePipeline::new(provider, 1, 7, config).unwrap();

        assert!(pipeline.publish(frame(1, Perspective::Mono)).is_ok());
    }

    #[test]
    fn buffer_size_mismatch_is_rejected() {
        let (provider, _) = MockProvider::new();
        let mut pipeline =
            FramePipeline::new(provider, 1, 7, PipelineConfig::default()).unwrap();

        let mut bad = frame(1, Perspective::Mono);
        bad.pixels.truncate(100);

        let err = pipeline.publish(bad).unwrap_err();
        assert!(matches!(
            err,
            ImageError::BufferSizeMismatch {
                expected: 307_200,
                actual: 100,
            }
        ));
    }

    #[test]
    fn zero_slot_config_is_rejected() {
        let (provider, _) = MockProvider::new();
        let config = PipelineConfig::builder().slots(0).build();

        let err = FramePipeline::new(provider, 1, 7, config).unwrap_err();
        assert!(matches!(err, ImageError::EmptyPool));
    }

    #[test]
    fn warp_and_rectify_refuse_stale_handles() {
        let (provider, _) = MockProvider::new();
        let config = PipelineConfig::builder().slots(1).build();
        let mut pipeline = FramePipeline::new(provider, 1, 7, config).unwrap();

        let old = pipeline.publish(frame(1, Perspective::Mono)).unwrap();
        let live = pipeline.publish(frame(2, Perspective::Mono)).unwrap();

        assert!(pipeline.warp(&old, RayDirection::new(0.0, 0.0)).is_none());
        assert!(pipeline.rectify(&old, PixelCoord::new(320.0, 240.0)).is_none());

        // The uniform mock grid sends every ray to the image center.
        let center = pipeline.warp(&live, RayDirection::new(0.0, 0.0)).unwrap();
        assert_eq!((center.x, center.y, center.z), (320.0, 240.0, 0.0));
    }

    #[test]
    fn close_clears_the_calibration_cache() {
        let (provider, _) = MockProvider::new();
        let mut pipeline =
            FramePipeline::new(provider, 1, 7, PipelineConfig::default()).unwrap();

        pipeline.publish(frame(1, Perspective::StereoLeft)).unwrap();
        assert_eq!(pipeline.cached_matrices(), 1);

        pipeline.close();
        assert_eq!(pipeline.cached_matrices(), 0);
    }

    #[test]
    fn config_builder_applies_overrides() {
        let config = PipelineConfig::builder()
            .slots(16)
            .validate_dimensions(false)
            .max_dimension(Some(4096))
            .build();

        assert_eq!(config.slots, 16);
        assert!(!config.validate_dimensions);
        assert_eq!(config.max_dimension, Some(4096));
    }
}
