//! Frame components

use crate::math::{Handedness, Matrix, Quaternion, Vector};

/// A reference frame: local transform `T` plus local orientation `Q`.
///
/// The local placement relative to the parent is `Q` as a rotation matrix
/// followed by `T`, so the frame spins about its own origin and `T` then
/// places it. With identity `Q` the placement is exactly `T`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    transform: Matrix,
    orientation: Quaternion,
}

impl Frame {
    /// Create a frame at the parent's origin
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a frame with just a translation
    #[must_use]
    pub fn from_translation(x: f32, y: f32, z: f32) -> Self {
        Self {
            transform: Matrix::translation(x, y, z),
            ..Default::default()
        }
    }

    /// Create from a local transform and orientation
    #[must_use]
    pub fn from_parts(transform: Matrix, orientation: Quaternion) -> Self {
        Self {
            transform,
            orientation,
        }
    }

    /// The local transform `T`
    #[must_use]
    pub const fn transform(&self) -> &Matrix {
        &self.transform
    }

    /// Replace the local transform `T`
    pub fn set_transform(&mut self, transform: Matrix) {
        self.transform = transform;
    }

    /// The local orientation `Q`
    #[must_use]
    pub const fn local_quaternion(&self) -> Quaternion {
        self.orientation
    }

    /// Local placement relative to the parent
    #[must_use]
    pub fn local(&self, handedness: Handedness) -> Matrix {
        self.orientation.to_matrix(handedness) * self.transform
    }
}

/// Mutators shared by everything that owns a [`Frame`].
///
/// Rotations accumulate into `Q` in the frame's own, already rotated, axes;
/// translation, scale and orient act on `T` directly.
pub trait Transformable {
    fn frame(&self) -> &Frame;

    fn frame_mut(&mut self) -> &mut Frame;

    fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.frame_mut().transform.translate(x, y, z);
    }

    fn scale(&mut self, sx: f32, sy: f32, sz: f32) {
        self.frame_mut().transform.scale(sx, sy, sz);
    }

    /// Replace the rotation block of `T` with that of `rot`
    fn orient(&mut self, rot: &Matrix) {
        self.frame_mut().transform.orient(rot);
    }

    /// Rotate by `rad` radians about a local axis
    fn rotate(&mut self, axis: Vector, rad: f32) {
        let frame = self.frame_mut();
        frame.orientation = frame.orientation * Quaternion::from_axis_angle(axis, rad);
    }

    fn rotate_x(&mut self, rad: f32) {
        self.rotate(Vector::X, rad);
    }

    fn rotate_y(&mut self, rad: f32) {
        self.rotate(Vector::Y, rad);
    }

    fn rotate_z(&mut self, rad: f32) {
        self.rotate(Vector::Z, rad);
    }
}

impl Transformable for Frame {
    fn frame(&self) -> &Frame {
        self
    }

    fn frame_mut(&mut self) -> &mut Frame {
        self
    }
}

/// Name component for debugging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Axis;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_default_local_is_identity() {
        let frame = Frame::new();
        assert_eq!(frame.local(Handedness::RightHanded), Matrix::IDENTITY);
    }

    #[test]
    fn test_translate_scale_act_on_transform() {
        let mut frame = Frame::new();
        frame.translate(1.0, 2.0, 3.0);
        frame.scale(2.0, 2.0, 2.0);

        assert_eq!(frame.transform().position(), Vector::new(2.0, 4.0, 6.0));
        assert_eq!(frame.local_quaternion(), Quaternion::IDENTITY);
    }

    #[test]
    fn test_rotations_accumulate() {
        let mut frame = Frame::new();
        frame.rotate_z(FRAC_PI_2 / 2.0);
        frame.rotate_z(FRAC_PI_2 / 2.0);

        let x = frame.local(Handedness::RightHanded).direction_of(Axis::X);
        assert!((x - Vector::Y).length() < 1e-5);
        // T is untouched by rotation
        assert_eq!(*frame.transform(), Matrix::IDENTITY);
    }

    #[test]
    fn test_rotation_is_about_own_origin() {
        let mut frame = Frame::from_translation(5.0, 0.0, 0.0);
        frame.rotate_y(1.0);

        let local = frame.local(Handedness::RightHanded);
        assert!((local.position() - Vector::new(5.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_rotate_in_local_axes() {
        let mut frame = Frame::new();
        frame.rotate_z(FRAC_PI_2);
        // local x now points along world y; rotating about local x turns
        // local y (world -x) onto world z
        frame.rotate_x(FRAC_PI_2);

        let local = frame.local(Handedness::RightHanded);
        assert!((local.direction_of(Axis::X) - Vector::Y).length() < 1e-5);
        assert!((local.direction_of(Axis::Y) - Vector::Z).length() < 1e-5);
    }

    #[test]
    fn test_orient_replaces_rotation_block() {
        let mut frame = Frame::from_translation(1.0, 2.0, 3.0);
        frame.orient(&Matrix::rotation_x(0.5));

        assert_eq!(frame.transform().position(), Vector::new(1.0, 2.0, 3.0));
        assert!(
            frame
                .transform()
                .rotation()
                .abs_diff_eq(&Matrix::rotation_x(0.5), 1e-6)
        );
    }
}
