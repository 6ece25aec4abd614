//! Coordinate axes and handedness

use super::Vector;

/// A principal local axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Unit vector along this axis
    #[must_use]
    pub const fn unit(self) -> Vector {
        match self {
            Self::X => Vector::X,
            Self::Y => Vector::Y,
            Self::Z => Vector::Z,
        }
    }

    /// Component of `v` along this axis
    #[must_use]
    pub const fn component(self, v: Vector) -> f32 {
        match self {
            Self::X => v.x,
            Self::Y => v.y,
            Self::Z => v.z,
        }
    }
}

/// Accepts `'x'`, `'y'`, `'z'` in either case; anything else is handed back.
impl TryFrom<char> for Axis {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            'x' => Ok(Self::X),
            'y' => Ok(Self::Y),
            'z' => Ok(Self::Z),
            _ => Err(c),
        }
    }
}

/// Coordinate-handedness convention for quaternion to matrix conversion.
///
/// Fixed for the lifetime of a [`Scene`](crate::ecs::Scene); the two
/// conventions are never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Handedness {
    /// Z runs from far to near. A positive rotation about Z turns +X onto +Y.
    #[default]
    RightHanded,
    /// Z runs from near to far (into the screen). Quaternion rotations turn
    /// the opposite way to the right-handed convention.
    LeftHanded,
}

impl Handedness {
    /// Sign applied to the Z component of models authored right-handed
    #[must_use]
    pub const fn z_sign(self) -> f32 {
        match self {
            Self::RightHanded => 1.0,
            Self::LeftHanded => -1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_from_char() {
        assert_eq!(Axis::try_from('x'), Ok(Axis::X));
        assert_eq!(Axis::try_from('Y'), Ok(Axis::Y));
        assert_eq!(Axis::try_from('z'), Ok(Axis::Z));
        assert_eq!(Axis::try_from('w'), Err('w'));
    }

    #[test]
    fn test_axis_component() {
        let v = Vector::new(1.0, 2.0, 3.0);
        assert_eq!(Axis::Y.component(v), 2.0);
        assert_eq!(Axis::Z.unit(), Vector::Z);
    }
}
