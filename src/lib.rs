//! Image core for an infrared optical tracking camera.
//!
//! This crate exposes the in-process image surface of a stereo tracking
//! device: pooled frame buffers with generation-stamped handles, a
//! per-connection calibration cache, and the lens distortion engine
//! (`warp`/`rectify`) driven by a 64x64 per-device calibration grid.
//!
//! Device I/O, connection management, and frame assembly live in the
//! surrounding driver layer; it feeds this crate pixel buffers and
//! calibration matrices through plain in-process calls.

pub mod image_core;
pub mod logger;
