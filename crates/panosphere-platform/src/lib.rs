//! # Panosphere Platform
//!
//! Collaborator interfaces consumed by the render loop. The loop itself is
//! pure geometry and math; everything with a platform footprint sits behind
//! these traits:
//! - **Surface**: drawable target, size, and swap timing
//! - **Video**: decoded-frame texture transform and new-frame flag
//! - **Tracker**: head-orientation samples, with scoped resume/pause
//! - **Gestures**: drag and pinch delivery from the input thread

pub mod gestures;
pub mod surface;
pub mod tracker;
pub mod video;

pub use gestures::{GestureEvent, GestureReceiver, GestureSender};
pub use surface::RenderSurface;
pub use tracker::{HeadTracker, ReferenceFrame, TrackerSession};
pub use video::{VideoFrame, VideoFrameSource};

use thiserror::Error;

/// Platform collaborator errors
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("swap buffers failed: {0}")]
    SwapFailed(String),

    #[error("surface lost: {0}")]
    SurfaceLost(String),

    #[error("head tracker unavailable: {0}")]
    TrackerUnavailable(String),
}

/// Result type for platform operations
pub type PlatformResult<T> = Result<T, PlatformError>;
