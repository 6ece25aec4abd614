//! Boundary classification for shapes

use crate::ecs::{Frame, Transformable};
use crate::math::{Plane, Vector};

/// Simplified bounding volumes attached to a frame.
///
/// A boundary may carry more than one classification at once; the collision
/// query picks one per pair (see [`collision`](super::collision)).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Boundary {
    radius: Option<f32>,
    plane: Option<Plane>,
    extents: Option<(Vector, Vector)>,
}

impl Boundary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sphere radius, if classified as a sphere
    #[must_use]
    pub const fn sphere(&self) -> Option<f32> {
        self.radius
    }

    /// Half-space in the owner's local frame, if classified as a plane
    #[must_use]
    pub const fn plane(&self) -> Option<Plane> {
        self.plane
    }

    /// Local `(minimum, maximum)` box corners, if classified as axis-aligned
    #[must_use]
    pub const fn axis_aligned(&self) -> Option<(Vector, Vector)> {
        self.extents
    }

    /// True when no classification is set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.radius.is_none() && self.plane.is_none() && self.extents.is_none()
    }
}

/// Boundary setters shared by everything that owns a [`Boundary`]
pub trait Collidable {
    fn boundary(&self) -> &Boundary;

    fn boundary_mut(&mut self) -> &mut Boundary;

    /// Mark as a sphere of radius `r` about the world position
    fn set_radius(&mut self, r: f32) {
        self.boundary_mut().radius = Some(r);
    }

    /// Mark as a sphere enclosing a box with half-extents `x`, `y`, `z`
    fn set_radius_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.set_radius(Vector::new(x, y, z).length());
    }

    /// Sphere radius, zero when not a sphere
    fn radius(&self) -> f32 {
        self.boundary().radius.unwrap_or(0.0)
    }

    /// Mark as the half-space `dot(n, p) + d < 0` in local coordinates
    fn set_plane(&mut self, n: Vector, d: f32) {
        self.boundary_mut().plane = Some(Plane::new(n, d));
    }

    /// Mark as a box with local corners `min` and `max`. Corners given out of
    /// order are sorted per axis.
    fn set_axis_aligned(&mut self, min: Vector, max: Vector) {
        let lo = Vector::new(min.x.min(max.x), min.y.min(max.y), min.z.min(max.z));
        let hi = Vector::new(min.x.max(max.x), min.y.max(max.y), min.z.max(max.z));
        self.boundary_mut().extents = Some((lo, hi));
    }
}

impl Collidable for Boundary {
    fn boundary(&self) -> &Boundary {
        self
    }

    fn boundary_mut(&mut self) -> &mut Boundary {
        self
    }
}

/// A frame with a boundary: the one concrete type that is both
/// [`Transformable`] and [`Collidable`].
///
/// Spawning a shape into a [`Scene`](crate::ecs::Scene) stores its frame and
/// boundary as separate components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Shape {
    frame: Frame,
    boundary: Boundary,
}

impl Shape {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_parts(frame: Frame, boundary: Boundary) -> Self {
        Self { frame, boundary }
    }

    #[must_use]
    pub fn into_parts(self) -> (Frame, Boundary) {
        (self.frame, self.boundary)
    }
}

impl Transformable for Shape {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }
}

impl Collidable for Shape {
    fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    fn boundary_mut(&mut self) -> &mut Boundary {
        &mut self.boundary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_boundary_is_empty() {
        let boundary = Boundary::new();
        assert!(boundary.is_empty());
        assert_eq!(boundary.radius(), 0.0);
    }

    #[test]
    fn test_classifications_coexist() {
        let mut shape = Shape::new();
        shape.set_axis_aligned(Vector::new(-10.0, -10.0, -10.0), Vector::new(10.0, 10.0, 10.0));
        shape.set_plane(Vector::new(-1.0, 0.0, 0.0), 10.0);

        let boundary = shape.boundary();
        assert!(boundary.axis_aligned().is_some());
        assert!(boundary.plane().is_some());
        assert!(boundary.sphere().is_none());
    }

    #[test]
    fn test_anisotropic_radius_encloses_box() {
        let mut shape = Shape::new();
        shape.set_radius_xyz(2.0, 3.0, 6.0);
        assert!((shape.radius() - 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_axis_aligned_sorts_corners() {
        let mut boundary = Boundary::new();
        boundary.set_axis_aligned(Vector::new(1.0, -1.0, 5.0), Vector::new(-1.0, 1.0, -5.0));

        let (min, max) = boundary.axis_aligned().unwrap();
        assert_eq!(min, Vector::new(-1.0, -1.0, -5.0));
        assert_eq!(max, Vector::new(1.0, 1.0, 5.0));
    }

    #[test]
    fn test_shape_is_transformable() {
        let mut shape = Shape::new();
        shape.translate(1.0, 2.0, 3.0);
        shape.set_radius(4.0);

        let (frame, boundary) = shape.into_parts();
        assert_eq!(frame.transform().position(), Vector::new(1.0, 2.0, 3.0));
        assert_eq!(boundary.sphere(), Some(4.0));
    }
}
