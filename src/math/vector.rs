//! Three-component vector for points and directions

use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use bytemuck::{Pod, Zeroable};

use super::Matrix;

/// A 3D point or direction.
///
/// C-compatible layout so slices of vectors can be handed to a GPU buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length
    #[must_use]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Unit vector in the same direction.
    ///
    /// The caller must not pass a zero-length vector. This is a contract
    /// violation, checked only in debug builds.
    #[must_use]
    pub fn normal(self) -> Self {
        let length = self.length();
        debug_assert!(length != 0.0, "normal() of a zero-length vector");
        self / length
    }

    /// Unit vector in the same direction, or `None` for a zero or
    /// non-finite vector.
    ///
    /// The vector is first divided by its largest component, so axes far
    /// below or above the `f32` square-root range still normalize.
    #[must_use]
    pub fn try_normal(self) -> Option<Self> {
        if !(self.x.is_finite() && self.y.is_finite() && self.z.is_finite()) {
            return None;
        }
        let largest = self.x.abs().max(self.y.abs()).max(self.z.abs());
        if largest == 0.0 {
            return None;
        }
        let scaled = Self::new(self.x / largest, self.y / largest, self.z / largest);
        Some(scaled / scaled.length())
    }

    /// True when every component is exactly zero
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// Transform as a direction: the rotation/scale block of `m` applies,
    /// its translation does not.
    #[must_use]
    pub fn transform_direction(self, m: &Matrix) -> Self {
        Self::new(
            self.x * m.m11 + self.y * m.m21 + self.z * m.m31,
            self.x * m.m12 + self.y * m.m22 + self.z * m.m32,
            self.x * m.m13 + self.y * m.m23 + self.z * m.m33,
        )
    }
}

/// Free-function form of [`Vector::cross`]
#[must_use]
pub fn cross(a: Vector, b: Vector) -> Vector {
    a.cross(b)
}

/// Free-function form of [`Vector::dot`]
#[must_use]
pub fn dot(a: Vector, b: Vector) -> f32 {
    a.dot(b)
}

/// Free-function form of [`Vector::normal`]
#[must_use]
pub fn normal(a: Vector) -> Vector {
    a.normal()
}

impl Add for Vector {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Vector {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Vector {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Vector {
    type Output = Self;
    fn mul(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Mul<Vector> for f32 {
    type Output = Vector;
    fn mul(self, v: Vector) -> Vector {
        v * self
    }
}

impl MulAssign<f32> for Vector {
    fn mul_assign(&mut self, s: f32) {
        *self = *self * s;
    }
}

/// Division by zero leaves the vector unchanged.
impl Div<f32> for Vector {
    type Output = Self;
    fn div(self, s: f32) -> Self {
        if s == 0.0 {
            return self;
        }
        Self::new(self.x / s, self.y / s, self.z / s)
    }
}

/// Transform as a point (translation included).
impl Mul<Matrix> for Vector {
    type Output = Self;
    fn mul(self, m: Matrix) -> Self {
        Self::new(
            self.x * m.m11 + self.y * m.m21 + self.z * m.m31 + m.m41,
            self.x * m.m12 + self.y * m.m22 + self.z * m.m32 + m.m42,
            self.x * m.m13 + self.y * m.m23 + self.z * m.m33 + m.m43,
        )
    }
}

impl MulAssign<Matrix> for Vector {
    fn mul_assign(&mut self, m: Matrix) {
        *self = *self * m;
    }
}

impl From<glam::Vec3> for Vector {
    fn from(v: glam::Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector> for glam::Vec3 {
    fn from(v: Vector) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_division_by_zero_is_identity() {
        let v = Vector::new(3.0, 4.0, 5.0);
        assert_eq!(v / 0.0, v);
    }

    #[test]
    fn test_division() {
        let v = Vector::new(2.0, 4.0, 6.0) / 2.0;
        assert_eq!(v, Vector::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_length_and_normal() {
        let v = Vector::new(3.0, 4.0, 0.0);
        assert!((v.length() - 5.0).abs() < 1e-6);

        let n = normal(v);
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_try_normal_survives_extreme_lengths() {
        for length in [1e-30, 1e-40, 1e20, f32::MAX] {
            let n = Vector::new(0.0, -length, length).try_normal().unwrap();
            assert!((n.length() - 1.0).abs() < 1e-6, "length {length}");
            assert!((n.z - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
        }
        assert_eq!(Vector::ZERO.try_normal(), None);
        assert_eq!(Vector::new(f32::NAN, 1.0, 0.0).try_normal(), None);
        assert_eq!(Vector::new(f32::INFINITY, 0.0, 0.0).try_normal(), None);
    }

    #[test]
    fn test_cross_follows_axis_order() {
        assert_eq!(cross(Vector::X, Vector::Y), Vector::Z);
        assert_eq!(cross(Vector::Y, Vector::Z), Vector::X);
        assert_eq!(dot(Vector::X, Vector::Y), 0.0);
    }

    #[test]
    fn test_point_vs_direction_transform() {
        let m = Matrix::translation(1.0, 2.0, 3.0);
        let v = Vector::new(1.0, 1.0, 1.0);

        assert_eq!(v * m, Vector::new(2.0, 3.0, 4.0));
        assert_eq!(v.transform_direction(&m), v);
    }

    #[test]
    fn test_scalar_ops() {
        let v = Vector::new(1.0, -2.0, 3.0);
        assert_eq!(2.0 * v, v * 2.0);
        assert_eq!(-v, Vector::new(-1.0, 2.0, -3.0));
        assert_eq!(v + v - v, v);
    }
}
