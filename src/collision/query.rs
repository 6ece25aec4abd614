//! Proximity and intersection queries

use crate::ecs::Transformable;
use crate::math::{Handedness, Matrix, Plane, Vector};

use super::{Boundary, Collidable, Shape};

/// A boundary resolved into world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    /// World position of the owning frame
    pub center: Vector,
    /// Sphere radius about `center`
    pub sphere: Option<f32>,
    /// World-space half-space
    pub plane: Option<Plane>,
    /// World-space box corners: local extents offset by `center`, unrotated
    pub axis_aligned: Option<(Vector, Vector)>,
}

impl WorldBounds {
    /// Resolve a boundary against its owner's world transform
    #[must_use]
    pub fn resolve(boundary: &Boundary, world: &Matrix) -> Self {
        let center = world.position();
        Self {
            center,
            sphere: boundary.sphere(),
            plane: boundary.plane().map(|plane| plane.transformed(world)),
            axis_aligned: boundary
                .axis_aligned()
                .map(|(min, max)| (min + center, max + center)),
        }
    }

    /// Bounds of a parentless shape
    #[must_use]
    pub fn of_shape(shape: &Shape, handedness: Handedness) -> Self {
        Self::resolve(shape.boundary(), &shape.frame().local(handedness))
    }

    /// The same bounds moved by `offset`
    #[must_use]
    pub fn translated(&self, offset: Vector) -> Self {
        Self {
            center: self.center + offset,
            sphere: self.sphere,
            plane: self.plane.map(|plane| plane.translated(offset)),
            axis_aligned: self
                .axis_aligned
                .map(|(min, max)| (min + offset, max + offset)),
        }
    }
}

/// Would `b`, moved by `displacement`, be in contact with `a`?
///
/// `displacement` is a proposed move of `b` that has not been committed; the
/// caller decides what to do with the answer. The first applicable test wins:
///
/// 1. sphere / sphere: center distance below the sum of the radii;
/// 2. sphere / plane (either order): the sphere center's signed distance
///    `dot(n, c) + d` is below the radius, i.e. the sphere reaches into the
///    positive side;
/// 3. box / box: the intervals overlap on every axis.
///
/// Every comparison is strict, so exact tangency is not contact. Pairs with
/// no applicable test never collide.
#[must_use]
pub fn collision(a: &WorldBounds, b: &WorldBounds, displacement: Vector) -> bool {
    let b = b.translated(displacement);

    if let (Some(ra), Some(rb)) = (a.sphere, b.sphere) {
        return (b.center - a.center).length() < ra + rb;
    }
    if let (Some(r), Some(plane)) = (a.sphere, b.plane) {
        return sphere_reaches_plane(a.center, r, &plane);
    }
    if let (Some(plane), Some(r)) = (a.plane, b.sphere) {
        return sphere_reaches_plane(b.center, r, &plane);
    }
    if let (Some(box_a), Some(box_b)) = (a.axis_aligned, b.axis_aligned) {
        return boxes_overlap(box_a, box_b);
    }

    log::trace!("No boundary test applies to {a:?} and {b:?}");
    false
}

fn sphere_reaches_plane(center: Vector, radius: f32, plane: &Plane) -> bool {
    plane.signed_distance(center) < radius
}

fn boxes_overlap((min_a, max_a): (Vector, Vector), (min_b, max_b): (Vector, Vector)) -> bool {
    min_a.x < max_b.x
        && min_b.x < max_a.x
        && min_a.y < max_b.y
        && min_b.y < max_a.y
        && min_a.z < max_b.z
        && min_b.z < max_a.z
}
