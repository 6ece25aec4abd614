//! 4x4 affine transform

use std::ops::{Mul, MulAssign};

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::{Axis, Vector};

/// A 4x4 affine transform from local space to parent space.
///
/// Row-major, row-vector convention: the upper-left 3x3 block holds rotation
/// and scale, the fourth row (`m41`, `m42`, `m43`) holds the translation.
///
/// The storage is bit-identical to a column-major `glam::Mat4` of the
/// transposed (column-vector) transform, so the arithmetic is done in glam.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Matrix {
    pub m11: f32,
    pub m12: f32,
    pub m13: f32,
    pub m14: f32,
    pub m21: f32,
    pub m22: f32,
    pub m23: f32,
    pub m24: f32,
    pub m31: f32,
    pub m32: f32,
    pub m33: f32,
    pub m34: f32,
    pub m41: f32,
    pub m42: f32,
    pub m43: f32,
    pub m44: f32,
}

impl Matrix {
    pub const IDENTITY: Self = Self::from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    #[must_use]
    pub const fn from_rows(r: [[f32; 4]; 4]) -> Self {
        Self {
            m11: r[0][0],
            m12: r[0][1],
            m13: r[0][2],
            m14: r[0][3],
            m21: r[1][0],
            m22: r[1][1],
            m23: r[1][2],
            m24: r[1][3],
            m31: r[2][0],
            m32: r[2][1],
            m33: r[2][2],
            m34: r[2][3],
            m41: r[3][0],
            m42: r[3][1],
            m43: r[3][2],
            m44: r[3][3],
        }
    }

    #[must_use]
    pub const fn to_rows(&self) -> [[f32; 4]; 4] {
        [
            [self.m11, self.m12, self.m13, self.m14],
            [self.m21, self.m22, self.m23, self.m24],
            [self.m31, self.m32, self.m33, self.m34],
            [self.m41, self.m42, self.m43, self.m44],
        ]
    }

    #[must_use]
    pub const fn scaling(sx: f32, sy: f32, sz: f32) -> Self {
        Self::from_rows([
            [sx, 0.0, 0.0, 0.0],
            [0.0, sy, 0.0, 0.0],
            [0.0, 0.0, sz, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    #[must_use]
    pub const fn translation(x: f32, y: f32, z: f32) -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [x, y, z, 1.0],
        ])
    }

    #[must_use]
    pub fn rotation_x(rad: f32) -> Self {
        Mat4::from_rotation_x(rad).into()
    }

    #[must_use]
    pub fn rotation_y(rad: f32) -> Self {
        Mat4::from_rotation_y(rad).into()
    }

    #[must_use]
    pub fn rotation_z(rad: f32) -> Self {
        Mat4::from_rotation_z(rad).into()
    }

    /// Rotation of `rad` about an arbitrary axis. A zero axis yields identity.
    #[must_use]
    pub fn rotation_about(axis: Vector, rad: f32) -> Self {
        match axis.try_normal() {
            Some(axis) => Mat4::from_axis_angle(axis.into(), rad).into(),
            None => Self::IDENTITY,
        }
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        self.to_mat4().transpose().into()
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        *self *= Self::translation(x, y, z);
        self
    }

    pub fn rotate_x(&mut self, rad: f32) -> &mut Self {
        *self *= Self::rotation_x(rad);
        self
    }

    pub fn rotate_y(&mut self, rad: f32) -> &mut Self {
        *self *= Self::rotation_y(rad);
        self
    }

    pub fn rotate_z(&mut self, rad: f32) -> &mut Self {
        *self *= Self::rotation_z(rad);
        self
    }

    pub fn rotate(&mut self, axis: Vector, rad: f32) -> &mut Self {
        *self *= Self::rotation_about(axis, rad);
        self
    }

    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) -> &mut Self {
        *self *= Self::scaling(sx, sy, sz);
        self
    }

    /// Replace the rotation/scale block with that of `rot`, keeping the
    /// translation.
    pub fn orient(&mut self, rot: &Self) -> &mut Self {
        self.m11 = rot.m11;
        self.m12 = rot.m12;
        self.m13 = rot.m13;
        self.m21 = rot.m21;
        self.m22 = rot.m22;
        self.m23 = rot.m23;
        self.m31 = rot.m31;
        self.m32 = rot.m32;
        self.m33 = rot.m33;
        self
    }

    /// Translation component
    #[must_use]
    pub const fn position(&self) -> Vector {
        Vector::new(self.m41, self.m42, self.m43)
    }

    /// Rotation/scale block with the translation stripped
    #[must_use]
    pub const fn rotation(&self) -> Self {
        Self::from_rows([
            [self.m11, self.m12, self.m13, 0.0],
            [self.m21, self.m22, self.m23, 0.0],
            [self.m31, self.m32, self.m33, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// `v` carried through the rotation block
    #[must_use]
    pub fn direction(&self, v: Vector) -> Vector {
        v.transform_direction(self)
    }

    /// The image of a local unit axis, i.e. the matching row of the rotation
    /// block.
    #[must_use]
    pub fn direction_of(&self, axis: Axis) -> Vector {
        self.direction(axis.unit())
    }

    /// Inverse of an affine transform (fourth column `0, 0, 0, 1`).
    ///
    /// Returns `None` when the rotation/scale block is singular.
    #[must_use]
    pub fn inverse_affine(&self) -> Option<Self> {
        let m = self.to_mat4();
        let det = m.determinant();
        if !det.is_finite() || det.abs() <= f32::EPSILON * f32::EPSILON {
            return None;
        }
        Some(m.inverse().into())
    }

    /// Approximate equality within `epsilon` on every element
    #[must_use]
    pub fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        let a = self.to_rows();
        let b = other.to_rows();
        a.iter()
            .flatten()
            .zip(b.iter().flatten())
            .all(|(x, y)| (x - y).abs() <= epsilon)
    }

    /// Column-vector `glam` form of this transform, for renderers.
    #[must_use]
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_cols_array(bytemuck::cast_ref(self))
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        // row vectors: self applies first, so it is the right-hand glam factor
        (other.to_mat4() * self.to_mat4()).into()
    }
}

impl MulAssign for Matrix {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl From<Mat4> for Matrix {
    fn from(m: Mat4) -> Self {
        bytemuck::cast(m.to_cols_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    fn approx(a: Vector, b: Vector) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn test_identity_is_default() {
        assert_eq!(Matrix::default(), Matrix::IDENTITY);
        assert_eq!(Matrix::IDENTITY * Matrix::IDENTITY, Matrix::IDENTITY);
    }

    #[test]
    fn test_translate_accumulates() {
        let mut m = Matrix::IDENTITY;
        m.translate(1.0, 2.0, 3.0).translate(1.0, 1.0, 1.0);
        assert_eq!(m.position(), Vector::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_composition_order() {
        // translate first, then rotate about the parent origin
        let m = Matrix::translation(10.0, 0.0, 0.0) * Matrix::rotation_z(FRAC_PI_2);
        assert!(approx(m.position(), Vector::new(0.0, 10.0, 0.0)));

        // rotate first, then translate
        let m = Matrix::rotation_z(FRAC_PI_2) * Matrix::translation(10.0, 0.0, 0.0);
        assert!(approx(m.position(), Vector::new(10.0, 0.0, 0.0)));
    }

    #[test]
    fn test_axis_rotations_turn_counter_clockwise() {
        let x = Matrix::rotation_z(FRAC_PI_2).direction_of(Axis::X);
        assert!(approx(x, Vector::Y));

        let y = Matrix::rotation_x(FRAC_PI_2).direction_of(Axis::Y);
        assert!(approx(y, Vector::Z));

        let z = Matrix::rotation_y(FRAC_PI_2).direction_of(Axis::Z);
        assert!(approx(z, Vector::X));
    }

    #[test]
    fn test_rotation_about_matches_principal_axes() {
        let a = Matrix::rotation_about(Vector::new(0.0, 0.0, 2.0), 0.7);
        assert!(a.abs_diff_eq(&Matrix::rotation_z(0.7), EPS));
        assert_eq!(Matrix::rotation_about(Vector::ZERO, 1.0), Matrix::IDENTITY);
    }

    #[test]
    fn test_transpose() {
        let m = Matrix::translation(1.0, 2.0, 3.0);
        let t = m.transpose();
        assert_eq!(t.m14, 1.0);
        assert_eq!(t.m24, 2.0);
        assert_eq!(t.m34, 3.0);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_rotation_strips_translation() {
        let mut m = Matrix::rotation_y(0.3);
        m.translate(5.0, 6.0, 7.0);
        let r = m.rotation();
        assert_eq!(r.position(), Vector::ZERO);
        assert!(r.abs_diff_eq(&Matrix::rotation_y(0.3), EPS));
    }

    #[test]
    fn test_orient_keeps_translation() {
        let mut m = Matrix::translation(4.0, 5.0, 6.0);
        m.orient(&Matrix::rotation_x(1.0));
        assert_eq!(m.position(), Vector::new(4.0, 5.0, 6.0));
        assert!(m.rotation().abs_diff_eq(&Matrix::rotation_x(1.0), EPS));
    }

    #[test]
    fn test_scale_affects_translation() {
        let mut m = Matrix::translation(1.0, 1.0, 1.0);
        m.scale(2.0, 3.0, 4.0);
        assert_eq!(m.position(), Vector::new(2.0, 3.0, 4.0));
        assert_eq!(m.m22, 3.0);
    }

    #[test]
    fn test_inverse_affine() {
        let mut m = Matrix::scaling(2.0, 2.0, 2.0);
        m.rotate(Vector::new(1.0, 1.0, 0.0), 0.8).translate(3.0, -4.0, 5.0);

        let inv = m.inverse_affine().unwrap();
        assert!((m * inv).abs_diff_eq(&Matrix::IDENTITY, 1e-4));
        assert!(Matrix::scaling(0.0, 1.0, 1.0).inverse_affine().is_none());
    }

    #[test]
    fn test_product_matches_hand_expansion() {
        let mut a = Matrix::rotation_x(0.3);
        a.translate(1.0, 2.0, 3.0);
        let mut b = Matrix::scaling(2.0, 1.0, 0.5);
        b.rotate_y(-0.9);

        let (ra, rb) = (a.to_rows(), b.to_rows());
        let product = (a * b).to_rows();
        for i in 0..4 {
            for j in 0..4 {
                let expected: f32 = (0..4).map(|k| ra[i][k] * rb[k][j]).sum();
                assert!((product[i][j] - expected).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_rotation_about_tiny_and_huge_axes() {
        let reference = Matrix::rotation_x(0.6);
        for length in [1e-30, 1e-40, 1e20, f32::MAX] {
            let m = Matrix::rotation_about(Vector::new(length, 0.0, 0.0), 0.6);
            assert!(m.abs_diff_eq(&reference, EPS), "axis length {length}");
        }
    }

    #[test]
    fn test_glam_round_trip_preserves_points() {
        let mut m = Matrix::rotation_z(0.4);
        m.translate(1.0, 2.0, 3.0);
        let p = Vector::new(1.0, -1.0, 2.0);

        let ours = p * m;
        let theirs = m.to_mat4().transform_point3(p.into());
        assert!(approx(ours, theirs.into()));
        assert_eq!(Matrix::from(m.to_mat4()), m);
    }
}
