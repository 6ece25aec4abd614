//! Math primitives for the transform hierarchy
//!
//! Row-vector convention throughout: a point is transformed as `v * M`, the
//! translation of a `Matrix` lives in its fourth row, and `A * B` applies `A`
//! first, then `B`.

mod axis;
mod matrix;
mod plane;
mod quaternion;
mod vector;

pub use axis::{Axis, Handedness};
pub use matrix::Matrix;
pub use plane::Plane;
pub use quaternion::Quaternion;
pub use vector::{Vector, cross, dot, normal};

/// Convert degrees to radians
#[must_use]
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}
