//! Column-major 4x4 matrix operations
//!
//! Small transform library used to compose the per-frame vertex transform.
//! Degenerate inputs follow explicit fallback policies (identity, zeroed
//! basis vectors) instead of producing NaNs, so the per-frame path stays
//! free of conditional error handling.

use std::ops::Mul;

use glam::Vec3;

/// 4x4 homogeneous transform, 16 floats in column-major order.
///
/// Plain value type; composition is done by value (`m = m * r`), so there is
/// no aliasing to worry about between inputs and outputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4(pub [f32; 16]);

impl Mat4 {
    /// Identity transform.
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// Create a matrix from a column-major float array.
    pub const fn from_cols_array(m: [f32; 16]) -> Self {
        Self(m)
    }

    /// Column-major float array, in shader-uniform layout.
    pub const fn to_cols_array(self) -> [f32; 16] {
        self.0
    }

    /// Borrow the column-major floats, in shader-uniform layout.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Right-multiply by an elementary rotation about the X axis.
    ///
    /// Angle is in radians. Only the Y and Z columns change; the X and W
    /// columns are already in place.
    pub fn rotate_x(&mut self, rad: f32) {
        let (s, c) = rad.sin_cos();
        let m = &mut self.0;
        let a10 = m[4];
        let a11 = m[5];
        let a12 = m[6];
        let a13 = m[7];
        let a20 = m[8];
        let a21 = m[9];
        let a22 = m[10];
        let a23 = m[11];
        m[4] = a10 * c + a20 * s;
        m[5] = a11 * c + a21 * s;
        m[6] = a12 * c + a22 * s;
        m[7] = a13 * c + a23 * s;
        m[8] = a20 * c - a10 * s;
        m[9] = a21 * c - a11 * s;
        m[10] = a22 * c - a12 * s;
        m[11] = a23 * c - a13 * s;
    }

    /// Right-multiply by an elementary rotation about the Y axis.
    pub fn rotate_y(&mut self, rad: f32) {
        let (s, c) = rad.sin_cos();
        let m = &mut self.0;
        let a00 = m[0];
        let a01 = m[1];
        let a02 = m[2];
        let a03 = m[3];
        let a20 = m[8];
        let a21 = m[9];
        let a22 = m[10];
        let a23 = m[11];
        m[0] = a00 * c - a20 * s;
        m[1] = a01 * c - a21 * s;
        m[2] = a02 * c - a22 * s;
        m[3] = a03 * c - a23 * s;
        m[8] = a00 * s + a20 * c;
        m[9] = a01 * s + a21 * c;
        m[10] = a02 * s + a22 * c;
        m[11] = a03 * s + a23 * c;
    }

    /// Right-multiply by an elementary rotation about the Z axis.
    pub fn rotate_z(&mut self, rad: f32) {
        let (s, c) = rad.sin_cos();
        let m = &mut self.0;
        let a00 = m[0];
        let a01 = m[1];
        let a02 = m[2];
        let a03 = m[3];
        let a10 = m[4];
        let a11 = m[5];
        let a12 = m[6];
        let a13 = m[7];
        m[0] = a00 * c + a10 * s;
        m[1] = a01 * c + a11 * s;
        m[2] = a02 * c + a12 * s;
        m[3] = a03 * c + a13 * s;
        m[4] = a10 * c - a00 * s;
        m[5] = a11 * c - a01 * s;
        m[6] = a12 * c - a02 * s;
        m[7] = a13 * c - a03 * s;
    }

    /// Copying form of [`rotate_x`](Self::rotate_x).
    pub fn rotated_x(mut self, rad: f32) -> Self {
        self.rotate_x(rad);
        self
    }

    /// Copying form of [`rotate_y`](Self::rotate_y).
    pub fn rotated_y(mut self, rad: f32) -> Self {
        self.rotate_y(rad);
        self
    }

    /// Copying form of [`rotate_z`](Self::rotate_z).
    pub fn rotated_z(mut self, rad: f32) -> Self {
        self.rotate_z(rad);
        self
    }

    /// View matrix looking from `eye` toward `center` with the given `up`.
    ///
    /// Degenerate inputs fall back instead of erroring: `eye == center`
    /// (exact) returns the identity, and a near-zero cross product zeroes
    /// the corresponding basis vector rather than dividing by a near-zero
    /// length.
    pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Self {
        if eye == center {
            return Self::IDENTITY;
        }
        let z = (eye - center).normalize();
        let x = up.cross(z).normalize_or_zero();
        let y = z.cross(x).normalize_or_zero();
        Self([
            x.x,
            y.x,
            z.x,
            0.0,
            x.y,
            y.y,
            z.y,
            0.0,
            x.z,
            y.z,
            z.z,
            0.0,
            -x.dot(eye),
            -y.dot(eye),
            -z.dot(eye),
            1.0,
        ])
    }

    /// Perspective projection with a vertical field of view in degrees.
    pub fn perspective(fovy_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fovy_degrees.to_radians() / 2.0).tan();
        let range = 1.0 / (near - far);
        Self([
            f / aspect,
            0.0,
            0.0,
            0.0,
            0.0,
            f,
            0.0,
            0.0,
            0.0,
            0.0,
            (far + near) * range,
            -1.0,
            0.0,
            0.0,
            2.0 * far * near * range,
            0.0,
        ])
    }

    /// Maximum absolute difference between the two matrices, for tolerance
    /// comparisons.
    pub fn max_abs_diff(&self, other: &Self) -> f32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    /// Standard column-major product: the columns of `rhs` transformed by
    /// `self`.
    fn mul(self, rhs: Mat4) -> Mat4 {
        let a = &self.0;
        let b = &rhs.0;
        let mut out = [0.0f32; 16];
        for col in 0..4 {
            let b0 = b[col * 4];
            let b1 = b[col * 4 + 1];
            let b2 = b[col * 4 + 2];
            let b3 = b[col * 4 + 3];
            for row in 0..4 {
                out[col * 4 + row] =
                    b0 * a[row] + b1 * a[4 + row] + b2 * a[8 + row] + b3 * a[12 + row];
            }
        }
        Mat4(out)
    }
}
