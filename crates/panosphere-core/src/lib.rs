//! # Panosphere Core
//!
//! Math and state foundations for the Panosphere panoramic video viewer:
//! - **Mat4**: column-major 4x4 transforms (rotation, look-at, perspective,
//!   multiply) with explicit degenerate-input fallbacks
//! - **View state**: yaw/pitch/zoom mutated by gestures, snapshotted per
//!   frame by the render loop

pub mod mat4;
pub mod view;

pub use mat4::Mat4;
pub use view::{SharedViewState, ViewConfig, ViewSnapshot, ViewState};
