//! Frame metadata types

/// Pixel encoding of a camera image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ImageFormat {
    /// Single-channel infrared intensity.
    #[default]
    Infrared = 0,
    /// Interleaved Bayer mosaic.
    Ibrg = 1,
}

/// Camera perspective a frame was captured from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Perspective {
    #[default]
    Invalid = 0,
    StereoLeft = 1,
    StereoRight = 2,
    Mono = 3,
}

impl Perspective {
    /// Public numeric id exposed to API consumers.
    ///
    /// The id space is distinct from the enum discriminants: invalid is -1
    /// and the real perspectives count from 0.
    pub const fn public_id(self) -> i32 {
        match self {
            Self::Invalid => -1,
            Self::StereoLeft => 0,
            Self::StereoRight => 1,
            Self::Mono => 2,
        }
    }

    /// Inverse of [`public_id`](Self::public_id). Unknown ids map to
    /// `Invalid`.
    pub const fn from_public_id(id: i32) -> Self {
        match id {
            0 => Self::StereoLeft,
            1 => Self::StereoRight,
            2 => Self::Mono,
            _ => Self::Invalid,
        }
    }
}

/// A frame as delivered by the producing layer, before it is written into a
/// pool slot.
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// Pixel bytes, length = width * height * bytes_per_pixel.
    pub pixels: Vec<u8>,
    /// Width of the image in pixels.
    pub width: u32,
    /// Height of the image in pixels.
    pub height: u32,
    /// Bytes per pixel for the carried format.
    pub bytes_per_pixel: u32,
    /// Pixel encoding.
    pub format: ImageFormat,
    /// Camera perspective the frame was captured from.
    pub perspective: Perspective,
    /// Device frame id (running counter).
    pub frame_id: i64,
    /// Device capture timestamp in microseconds.
    pub timestamp: i64,
}

impl RawFrame {
    /// Expected pixel buffer length for the carried metadata.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.bytes_per_pixel as usize
    }
}
