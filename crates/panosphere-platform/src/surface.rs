//! Render Surface
//!
//! Drawable-target interface provided by the windowing/EGL layer.

use glam::UVec2;

use crate::PlatformResult;

/// Drawable target plus swap timing.
///
/// The render loop re-reads [`size`](Self::size) every frame, so a resize on
/// the windowing side takes effect in the next projection computation
/// without any extra notification plumbing.
pub trait RenderSurface: Send {
    /// Current drawable size in physical pixels. Must never report a zero
    /// dimension; a zero-sized surface is the provider's problem to hold
    /// frames for.
    fn size(&self) -> UVec2;

    /// Present the frame that was just drawn. Called once per successful
    /// frame.
    fn swap_buffers(&mut self) -> PlatformResult<()>;
}
