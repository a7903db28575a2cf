//! Video Frame Source
//!
//! Interface to the video decode pipeline. The render core only consumes
//! the texture-transform matrix; decoding and texture upload stay on the
//! provider's side.

use panosphere_core::Mat4;

/// Per-frame output of the decode pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoFrame {
    /// Texture-coordinate correction (crop/rotate) supplied by the decoder.
    /// Passed through to the shader uniform unmodified.
    pub texture_transform: Mat4,
    /// Whether a new decoded frame landed since the last poll.
    pub new_frame: bool,
}

impl Default for VideoFrame {
    fn default() -> Self {
        Self {
            texture_transform: Mat4::IDENTITY,
            new_frame: false,
        }
    }
}

/// Latches the most recent decoded frame. Polled once per frame from the
/// render thread; must never block.
pub trait VideoFrameSource: Send {
    fn poll(&mut self) -> VideoFrame;
}
