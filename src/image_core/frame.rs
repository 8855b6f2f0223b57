//! Pooled frame storage module
//!
//! This module provides the reusable frame slots, the generation-stamped
//! image handles consumers hold, and the frame metadata types.

mod handle;
mod pool;
pub mod types;

pub use handle::ImageHandle;
pub use pool::FramePool;
pub use types::{ImageFormat, Perspective, RawFrame};
