//! # Panosphere Renderer
//!
//! The reusable core of the panoramic viewer:
//! - **Mesh**: procedural UV-sphere generation for equirectangular video,
//!   with a lazily regenerated cache that can be dropped after GPU upload
//! - **Transform**: per-frame projection × view × model composition from
//!   head pose, gestures, and viewport size
//! - **Session**: the dedicated render-loop thread tying the platform
//!   collaborators together

pub mod mesh;
pub mod session;
pub mod transform;

pub use mesh::{Mesh, MeshCache};
pub use session::{FrameRenderer, GeometryConfig, RenderLoop, RenderSession, SessionConfig};
pub use transform::{FrameTransforms, vertex_transform};

use thiserror::Error;

/// Geometry errors, surfaced at generation time and never deferred to draw
/// time.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RendererError {
    #[error("sphere radius must be positive, got {0}")]
    InvalidRadius(f32),

    #[error("angular step must be positive, got {0}")]
    InvalidStep(f32),

    #[error("vertex count {0} exceeds the 16-bit index range")]
    VertexCountOverflow(usize),
}

/// Result type for renderer operations
pub type RendererResult<T> = Result<T, RendererError>;
