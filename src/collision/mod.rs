//! Boundary and collision module
//!
//! Sphere, half-space and axis-aligned box boundaries on top of the frame
//! hierarchy, with a pure contact predicate.

mod boundary;
mod query;

pub use boundary::{Boundary, Collidable, Shape};
pub use query::{WorldBounds, collision};
