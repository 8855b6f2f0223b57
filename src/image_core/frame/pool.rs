use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::trace;

use crate::image_core::calibration::types::CalibrationMatrix;
use crate::image_core::frame::handle::ImageHandle;
use crate::image_core::frame::types::{ImageFormat, Perspective, RawFrame};

/// Contents of a pool slot. Overwritten in place each time the slot is
/// recycled for a newer frame.
pub(crate) struct SlotPayload {
    pub(crate) pixels: Vec<u8>,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) bytes_per_pixel: u32,
    pub(crate) format: ImageFormat,
    pub(crate) perspective: Perspective,
    pub(crate) frame_id: i64,
    pub(crate) timestamp: i64,
    pub(crate) calibration: Option<Arc<CalibrationMatrix>>,
}

impl SlotPayload {
    fn empty() -> Self {
        Self {
            pixels: Vec::new(),
            width: 0,
            height: 0,
            bytes_per_pixel: 0,
            format: ImageFormat::Infrared,
            perspective: Perspective::Invalid,
            frame_id: -1,
            timestamp: 0,
            calibration: None,
        }
    }
}

/// One reusable buffer slot.
///
/// The generation counter is bumped once per overwrite, strictly after the
/// payload is fully written and while the payload lock is still held, so a
/// reader that observes a matching generation under the same lock sees a
/// consistent snapshot. Generations are monotonic and never reused.
pub(crate) struct FrameSlot {
    pub(crate) generation: AtomicU64,
    pub(crate) payload: Mutex<SlotPayload>,
}

impl FrameSlot {
    fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            payload: Mutex::new(SlotPayload::empty()),
        }
    }
}

/// Fixed-size arena of frame slots, recycled in ring order.
///
/// The pool is owned and mutated by the producing layer only; consumers
/// hold [`ImageHandle`]s, which are index/generation references and can
/// never dangle into a recycled slot. Generation 0 means "never published";
/// the first publish of a slot yields generation 1.
pub struct FramePool {
    slots: Vec<Arc<FrameSlot>>,
    cursor: usize,
}

impl FramePool {
    /// # Panics
    ///
    /// Panics if `slots` is zero.
    pub fn new(slots: usize) -> Self {
        assert!(slots > 0, "frame pool must have at least one slot");
        Self {
            slots: (0..slots).map(|_| Arc::new(FrameSlot::new())).collect(),
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Writes a frame into the next ring slot and returns a handle
    /// snapshotting the slot's new generation.
    ///
    /// Any handle still referring to the recycled slot becomes permanently
    /// stale the moment the generation is bumped.
    pub fn publish(
        &mut self,
        frame: RawFrame,
        calibration: Option<Arc<CalibrationMatrix>>,
    ) -> ImageHandle {
        let slot = &self.slots[self.cursor];
        self.cursor = (self.cursor + 1) % self.slots.len();

        let generation = {
            let mut payload = slot.payload.lock();
            payload.pixels = frame.pixels;
            payload.width = frame.width;
            payload.height = frame.height;
            payload.bytes_per_pixel = frame.bytes_per_pixel;
            payload.format = frame.format;
            payload.perspective = frame.perspective;
            payload.frame_id = frame.frame_id;
            payload.timestamp = frame.timestamp;
            payload.calibration = calibration;
            // Publish only after the payload is fully overwritten.
            slot.generation.fetch_add(1, Ordering::Release) + 1
        };

        trace!(frame_id = frame.frame_id, generation, "Published frame");
        ImageHandle::backed(Arc::clone(slot), generation)
    }
}
