//! Scene configuration

use crate::math::Handedness;

/// Scene configuration, fixed when the [`Scene`](crate::ecs::Scene) is
/// created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneConfig {
    /// Coordinate-handedness convention for every quaternion to matrix
    /// conversion in the scene
    pub handedness: Handedness,
}

impl SceneConfig {
    /// Set the coordinate handedness
    #[must_use]
    pub fn with_handedness(mut self, handedness: Handedness) -> Self {
        self.handedness = handedness;
        self
    }

    /// Sign to apply to Z coordinates authored in right-handed space
    #[must_use]
    pub const fn z_sign(&self) -> f32 {
        self.handedness.z_sign()
    }
}
