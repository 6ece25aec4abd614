//! Unit quaternion for orientation

use std::ops::{Mul, MulAssign};

use super::{Handedness, Matrix, Vector, deg_to_rad};

/// Unit quaternion representing an orientation.
///
/// Every constructor normalizes, so `norm() ≈ 1` holds for any value built
/// through this API.
///
/// Multiplication is the Hamilton product: `a * b` rotates by `b` first and
/// then by `a`, the same convention `glam` uses. Right-multiplying an
/// orientation by an increment therefore turns the object about its own,
/// already rotated, axes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Build from raw components and normalize. An all-zero input yields the
    /// identity.
    #[must_use]
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        let mut q = Self { x, y, z, w };
        q.normalize();
        q
    }

    /// From Euler angles in degrees: `roll` about X, `pitch` about Y, `yaw`
    /// about Z.
    #[must_use]
    pub fn from_euler_degrees(roll: f32, pitch: f32, yaw: f32) -> Self {
        let roll = f64::from(deg_to_rad(roll)) / 2.0;
        let pitch = f64::from(deg_to_rad(pitch)) / 2.0;
        let yaw = f64::from(deg_to_rad(yaw)) / 2.0;

        let (sin_roll, cos_roll) = roll.sin_cos();
        let (sin_pitch, cos_pitch) = pitch.sin_cos();
        let (sin_yaw, cos_yaw) = yaw.sin_cos();

        let cos_yaw_cos_pitch = cos_yaw * cos_pitch;
        let sin_yaw_sin_pitch = sin_yaw * sin_pitch;

        Self::new(
            (sin_roll * cos_yaw_cos_pitch - cos_roll * sin_yaw_sin_pitch) as f32,
            (cos_roll * sin_pitch * cos_yaw + sin_roll * cos_pitch * sin_yaw) as f32,
            (cos_roll * cos_pitch * sin_yaw - sin_roll * sin_pitch * cos_yaw) as f32,
            (cos_roll * cos_yaw_cos_pitch + sin_roll * sin_yaw_sin_pitch) as f32,
        )
    }

    /// Rotation of `rad` radians about `axis`. The axis need not be unit
    /// length; an exactly zero (or non-finite) axis yields the identity.
    #[must_use]
    pub fn from_axis_angle(axis: Vector, rad: f32) -> Self {
        let Some(axis) = axis.try_normal() else {
            return Self::IDENTITY;
        };
        let half = f64::from(rad) / 2.0;
        let (s, c) = half.sin_cos();
        let s = s as f32;
        Self::new(axis.x * s, axis.y * s, axis.z * s, c as f32)
    }

    #[must_use]
    pub fn from_rotation_x(rad: f32) -> Self {
        Self::from_axis_angle(Vector::X, rad)
    }

    #[must_use]
    pub fn from_rotation_y(rad: f32) -> Self {
        Self::from_axis_angle(Vector::Y, rad)
    }

    #[must_use]
    pub fn from_rotation_z(rad: f32) -> Self {
        Self::from_axis_angle(Vector::Z, rad)
    }

    /// Euclidean norm of the 4-tuple
    #[must_use]
    pub fn norm(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Scale to unit norm, then clamp each component to `[-1, 1]` so that
    /// rounding drift never leaks into the rotation matrix.
    ///
    /// Components are divided by the largest magnitude before the norm is
    /// taken, so very large or very small tuples keep their direction. An
    /// all-zero or non-finite tuple becomes the identity.
    pub fn normalize(&mut self) {
        let components = [self.x, self.y, self.z, self.w];
        if components.iter().any(|c| !c.is_finite()) {
            *self = Self::IDENTITY;
            return;
        }
        let largest = components.iter().fold(0.0_f32, |m, c| m.max(c.abs()));
        if largest == 0.0 {
            *self = Self::IDENTITY;
            return;
        }
        let [x, y, z, w] = components.map(|c| c / largest);
        let norm = (x * x + y * y + z * z + w * w).sqrt();
        self.x = (x / norm).clamp(-1.0, 1.0);
        self.y = (y / norm).clamp(-1.0, 1.0);
        self.z = (z / norm).clamp(-1.0, 1.0);
        self.w = (w / norm).clamp(-1.0, 1.0);
    }

    /// Equivalent rotation matrix under the given handedness convention.
    #[must_use]
    pub fn to_matrix(&self, handedness: Handedness) -> Matrix {
        let Self { x, y, z, w } = *self;
        let (x2, y2, z2) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);

        match handedness {
            Handedness::RightHanded => Matrix::from_rows([
                [1.0 - 2.0 * y2 - 2.0 * z2, 2.0 * xy + 2.0 * wz, 2.0 * xz - 2.0 * wy, 0.0],
                [2.0 * xy - 2.0 * wz, 1.0 - 2.0 * x2 - 2.0 * z2, 2.0 * yz + 2.0 * wx, 0.0],
                [2.0 * xz + 2.0 * wy, 2.0 * yz - 2.0 * wx, 1.0 - 2.0 * x2 - 2.0 * y2, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
            Handedness::LeftHanded => Matrix::from_rows([
                [1.0 - 2.0 * y2 - 2.0 * z2, 2.0 * xy - 2.0 * wz, 2.0 * xz + 2.0 * wy, 0.0],
                [2.0 * xy + 2.0 * wz, 1.0 - 2.0 * x2 - 2.0 * z2, 2.0 * yz - 2.0 * wx, 0.0],
                [2.0 * xz - 2.0 * wy, 2.0 * yz + 2.0 * wx, 1.0 - 2.0 * x2 - 2.0 * y2, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
        }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Quaternion {
    type Output = Self;
    fn mul(self, q: Self) -> Self {
        Self::new(
            self.w * q.x + self.x * q.w + self.y * q.z - self.z * q.y,
            self.w * q.y - self.x * q.z + self.y * q.w + self.z * q.x,
            self.w * q.z + self.x * q.y - self.y * q.x + self.z * q.w,
            self.w * q.w - self.x * q.x - self.y * q.y - self.z * q.z,
        )
    }
}

impl MulAssign for Quaternion {
    fn mul_assign(&mut self, q: Self) {
        *self = *self * q;
    }
}

/// Same rotation as `glam` sees it under [`Handedness::RightHanded`].
impl From<Quaternion> for glam::Quat {
    fn from(q: Quaternion) -> Self {
        Self::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

impl From<glam::Quat> for Quaternion {
    fn from(q: glam::Quat) -> Self {
        Self::new(q.x, q.y, q.z, q.w)
    }
}
