//! Frame hierarchy module
//!
//! Frames stored in a hecs world, with parent/child links and world-space
//! queries

mod cached;
mod components;
mod hierarchy;
mod world;

pub use cached::WorldCache;
pub use components::{Frame, Name, Transformable};
pub use hierarchy::{Children, Parent};
pub use world::Scene;
