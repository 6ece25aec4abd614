//! Hierarchical reference frames for 3D scenes
//!
//! This crate provides:
//! - Vector, matrix, quaternion and plane math in the row-vector convention
//! - Frames stored in a hecs world, with parent/child attachment
//! - World-space position and orientation queries
//! - Simplified sphere, plane and box collision tests

pub mod collision;
pub mod core;
pub mod ecs;
pub mod math;

// Re-exports for convenience
pub use glam;
pub use hecs;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::collision::{Boundary, Collidable, Shape, WorldBounds, collision};
    pub use crate::core::{SceneConfig, SceneError, Telemetry};
    pub use crate::ecs::{Children, Frame, Name, Parent, Scene, Transformable, WorldCache};
    pub use crate::math::{Axis, Handedness, Matrix, Plane, Quaternion, Vector};
    pub use hecs::Entity;
}
