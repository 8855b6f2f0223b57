use std::fmt;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use crate::image_core::calibration::types::CalibrationMatrix;
use crate::image_core::frame::pool::{FrameSlot, SlotPayload};
use crate::image_core::frame::types::ImageFormat;

/// Lightweight reference to a pooled frame.
///
/// A handle pairs a slot reference with the slot generation observed when
/// the frame was published. It stays cheap to clone and never owns pixel
/// storage; once the producer recycles the slot for a newer frame the
/// handle is permanently stale, and every accessor returns its documented
/// default instead of reading through the recycled buffer. Staleness is
/// detected lazily on access, never signalled eagerly.
///
/// Callers gate on [`is_valid`](Self::is_valid) before trusting computed
/// results; the distortion engine itself never re-checks validity.
#[derive(Clone)]
pub struct ImageHandle {
    slot: Option<Arc<FrameSlot>>,
    observed_generation: u64,
}

impl ImageHandle {
    /// The canonical empty handle: no backing slot, never valid.
    pub fn invalid() -> Self {
        Self {
            slot: None,
            observed_generation: 0,
        }
    }

    pub(crate) fn backed(slot: Arc<FrameSlot>, observed_generation: u64) -> Self {
        Self {
            slot: Some(slot),
            observed_generation,
        }
    }

    /// Whether the handle still refers to the frame it was created for.
    ///
    /// Once false it never reverts to true; generations are monotonic.
    pub fn is_valid(&self) -> bool {
        match &self.slot {
            None => false,
            Some(slot) => slot.generation.load(Ordering::Acquire) == self.observed_generation,
        }
    }

    /// Check-then-read: the generation is compared under the payload lock,
    /// so a matching generation guarantees a consistent snapshot of every
    /// field read inside `f`.
    fn read<T>(&self, default: T, f: impl FnOnce(&SlotPayload) -> T) -> T {
        let Some(slot) = &self.slot else {
            return default;
        };
        let payload = slot.payload.lock();
        if slot.generation.load(Ordering::Acquire) != self.observed_generation {
            return default;
        }
        f(&payload)
    }

    /// Snapshot of the pixel bytes, or `None` when the handle is stale.
    pub fn pixel_data(&self) -> Option<Vec<u8>> {
        self.read(None, |p| Some(p.pixels.clone()))
    }

    /// Calibration matrix attached to the frame, or `None` when the handle
    /// is stale or the frame carries no calibration.
    pub fn distortion_grid(&self) -> Option<Arc<CalibrationMatrix>> {
        self.read(None, |p| p.calibration.clone())
    }

    /// Image width in pixels; 0 when stale.
    pub fn width(&self) -> u32 {
        self.read(0, |p| p.width)
    }

    /// Image height in pixels; 0 when stale.
    pub fn height(&self) -> u32 {
        self.read(0, |p| p.height)
    }

    /// Bytes per pixel; 1 when stale.
    pub fn bytes_per_pixel(&self) -> u32 {
        self.read(1, |p| p.bytes_per_pixel)
    }

    /// Pixel encoding; [`ImageFormat::Infrared`] when stale.
    pub fn format(&self) -> ImageFormat {
        self.read(ImageFormat::Infrared, |p| p.format)
    }

    /// Device capture timestamp in microseconds; 0 when stale.
    pub fn timestamp(&self) -> i64 {
        self.read(0, |p| p.timestamp)
    }

    /// Device frame id; -1 when stale.
    pub fn frame_id(&self) -> i64 {
        self.read(-1, |p| p.frame_id)
    }

    /// Public perspective id; -1 when stale.
    pub fn perspective_id(&self) -> i32 {
        self.read(-1, |p| p.perspective.public_id())
    }

    /// Identity triple of a valid handle.
    fn identity(&self) -> Option<(i64, i32, i64)> {
        self.read(None, |p| {
            Some((p.frame_id, p.perspective.public_id(), p.timestamp))
        })
    }
}

impl Default for ImageHandle {
    fn default() -> Self {
        Self::invalid()
    }
}

/// Two handles denote the same image iff both are still valid and their
/// (frame id, perspective id, timestamp) triples match. A stale handle is
/// not equal to anything, itself included, which is why there is no `Eq`
/// implementation.
impl PartialEq for ImageHandle {
    fn eq(&self, other: &Self) -> bool {
        match (self.identity(), other.identity()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.read(None, |p| Some((p.width, p.height, p.format, p.frame_id))) {
            Some((width, height, format, frame_id)) => {
                write!(f, "ImageHandle({width}x{height}, {format:?}, frame {frame_id})")
            }
            None => write!(f, "ImageHandle(invalid)"),
        }
    }
}
