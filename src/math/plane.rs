//! Half-space boundary

use super::{Matrix, Vector};

/// Plane `dot(n, p) + d = 0` bounding a half-space.
///
/// The positive side is where `dot(n, p) + d < 0`. The inverted sign is
/// relied on by collision and must not be flipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vector,
    constant: f32,
}

impl Plane {
    /// Half-space holding no point: every signed distance is `+inf`
    pub const EMPTY: Self = Self::new(Vector::ZERO, f32::INFINITY);

    #[must_use]
    pub const fn new(normal: Vector, constant: f32) -> Self {
        Self { normal, constant }
    }

    #[must_use]
    pub const fn normal(&self) -> Vector {
        self.normal
    }

    #[must_use]
    pub const fn constant(&self) -> f32 {
        self.constant
    }

    /// Signed distance of `p` (in units of the normal's length)
    #[must_use]
    pub fn signed_distance(&self, p: Vector) -> f32 {
        self.normal.dot(p) + self.constant
    }

    #[must_use]
    pub fn on_positive_side(&self, p: Vector) -> bool {
        self.signed_distance(p) < 0.0
    }

    /// Carry the plane through an affine transform.
    ///
    /// The normal is rotated and re-normalized; the constant is recomputed
    /// from the transformed foot point. Non-uniform scale in `m` is not
    /// accounted for. A zero normal, or one that `m` collapses, gives
    /// [`Plane::EMPTY`].
    #[must_use]
    pub fn transformed(&self, m: &Matrix) -> Self {
        let (Some(unit), Some(normal)) = (
            self.normal.try_normal(),
            self.normal.transform_direction(m).try_normal(),
        ) else {
            return Self::EMPTY;
        };
        // n . unit is |n| without squaring
        let foot = (unit * (-self.constant / self.normal.dot(unit))) * *m;
        Self::new(normal, -normal.dot(foot))
    }

    /// The plane moved by `offset`
    #[must_use]
    pub fn translated(&self, offset: Vector) -> Self {
        Self::new(self.normal, self.constant - self.normal.dot(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_side_is_negative_expression() {
        let plane = Plane::new(Vector::new(-1.0, 0.0, 0.0), 10.0);

        // -x + 10 < 0 only beyond x = 10
        assert!(plane.on_positive_side(Vector::new(11.0, 0.0, 0.0)));
        assert!(!plane.on_positive_side(Vector::new(9.0, 0.0, 0.0)));
        assert!(!plane.on_positive_side(Vector::new(10.0, 0.0, 0.0)));
    }

    #[test]
    fn test_translated() {
        let plane = Plane::new(Vector::Y, 0.0).translated(Vector::new(0.0, 5.0, 0.0));
        assert_eq!(plane.signed_distance(Vector::new(0.0, 5.0, 0.0)), 0.0);
        assert_eq!(plane.signed_distance(Vector::new(3.0, 7.0, 1.0)), 2.0);
    }

    #[test]
    fn test_transformed_by_translation_matches_translated() {
        let plane = Plane::new(Vector::new(-1.0, 0.0, 0.0), 10.0);
        let m = Matrix::translation(20.0, -20.0, 40.0);

        let a = plane.transformed(&m);
        let b = plane.translated(m.position());
        assert!((a.constant() - b.constant()).abs() < 1e-5);
        assert!((a.normal() - b.normal()).length() < 1e-5);
    }

    #[test]
    fn test_degenerate_normal_gives_empty_plane() {
        let flat = Matrix::scaling(0.0, 1.0, 1.0);
        let collapsed = Plane::new(Vector::X, 5.0).transformed(&flat);
        assert_eq!(collapsed, Plane::EMPTY);
        assert!(!collapsed.on_positive_side(Vector::new(-100.0, 3.0, 2.0)));

        let zero = Plane::new(Vector::ZERO, 1.0).transformed(&Matrix::IDENTITY);
        assert_eq!(zero, Plane::EMPTY);
        assert!(!zero.translated(Vector::new(1.0, 2.0, 3.0)).on_positive_side(Vector::ZERO));
    }

    #[test]
    fn test_transformed_by_rotation() {
        let plane = Plane::new(Vector::X, -1.0);
        let m = Matrix::rotation_z(std::f32::consts::FRAC_PI_2);

        // x = 1 rotated a quarter turn is y = 1
        let rotated = plane.transformed(&m);
        assert!(rotated.signed_distance(Vector::new(0.0, 1.0, 0.0)).abs() < 1e-5);
        assert!((rotated.normal() - Vector::Y).length() < 1e-5);
    }
}
