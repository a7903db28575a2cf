//! Per-Frame Transform Composition
//!
//! Turns one head-orientation sample plus the current view snapshot and
//! viewport into the vertex-transform matrix for the frame. Pure arithmetic,
//! no error paths: degenerate matrix inputs are handled by the fallback
//! policies in `panosphere_core::mat4`, and a zero-sized viewport is a
//! caller precondition violation.

use glam::Vec3;
use panosphere_core::{Mat4, ViewSnapshot};

/// Vertical field of view in degrees.
const FOV_Y_DEGREES: f32 = 70.0;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 1000.0;
/// The camera always aims at this fixed anchor on the -Z axis; the zoom
/// distance moves the eye along +Z but never the target.
const LOOK_TARGET_Z: f32 = -500.0;

/// Matrices handed to the shader binding each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransforms {
    /// Combined projection × view × model matrix for the vertex stage.
    pub vertex: Mat4,
    /// Decoder-supplied texture matrix, passed through unmodified.
    pub texture: Mat4,
}

/// Compose the vertex transform for one frame.
///
/// The model term starts from the head pose when tracking is active (else
/// identity) and is then rotated about X by pitch, then about Y by yaw.
/// That X-before-Y order defines the look-around feel and is part of the
/// contract; do not swap it.
pub fn vertex_transform(
    view: ViewSnapshot,
    head_pose: Option<Mat4>,
    width: u32,
    height: u32,
) -> Mat4 {
    let model = head_pose
        .unwrap_or(Mat4::IDENTITY)
        .rotated_x(view.pitch.to_radians())
        .rotated_y(view.yaw.to_radians());
    let look = Mat4::look_at(
        Vec3::new(0.0, 0.0, view.distance),
        Vec3::new(0.0, 0.0, LOOK_TARGET_Z),
        Vec3::Y,
    );
    let projection = Mat4::perspective(
        FOV_Y_DEGREES,
        width as f32 / height as f32,
        NEAR_PLANE,
        FAR_PLANE,
    );
    (projection * look) * model
}
