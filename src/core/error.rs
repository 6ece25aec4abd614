//! Scene errors

use hecs::Entity;

/// Errors reported by scene operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The handle does not refer to a live frame (never spawned, or despawned)
    NoSuchFrame(Entity),
    /// The frame carries no boundary
    NotAShape(Entity),
    /// Re-parenting would make `child` its own ancestor
    CycleDetected {
        /// Frame being re-parented
        child: Entity,
        /// Rejected parent
        parent: Entity,
    },
    /// The frame still has children attached
    HasChildren(Entity),
    /// An axis name other than `x`, `y` or `z`
    InvalidAxis(char),
    /// The frame's world transform cannot be inverted
    SingularTransform(Entity),
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSuchFrame(e) => write!(f, "No such frame: {e:?}"),
            Self::NotAShape(e) => write!(f, "Frame {e:?} has no boundary"),
            Self::CycleDetected { child, parent } => {
                write!(f, "Attaching {child:?} to {parent:?} would create a cycle")
            }
            Self::HasChildren(e) => write!(f, "Frame {e:?} still has children"),
            Self::InvalidAxis(c) => write!(f, "Invalid axis: {c:?}"),
            Self::SingularTransform(e) => write!(f, "World transform of {e:?} is singular"),
        }
    }
}

impl std::error::Error for SceneError {}
