//! Cached world transforms
//!
//! [`Scene::world`] walks the ancestor chain on every call. A [`WorldCache`]
//! memoizes the result per frame and throws everything away as soon as the
//! scene's revision moves, so reads between mutations cost a hash lookup.
//!
//! ```ignore
//! let mut cache = WorldCache::new();
//! let m = cache.world(&scene, frame)?; // walks the chain
//! let m = cache.world(&scene, frame)?; // cached
//! scene.frame_mut(frame)?.translate(1.0, 0.0, 0.0);
//! let m = cache.world(&scene, frame)?; // stale, recomputed
//! ```

use hecs::Entity;
use rustc_hash::FxHashMap;

use super::Scene;
use crate::core::SceneError;
use crate::math::Matrix;

/// Memoized world matrices keyed by frame, valid for one scene revision.
#[derive(Debug, Default)]
pub struct WorldCache {
    revision: Option<u64>,
    worlds: FxHashMap<Entity, Matrix>,
}

impl WorldCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the scene changed since the cache was filled
    pub fn is_stale(&self, scene: &Scene) -> bool {
        self.revision != Some(scene.revision())
    }

    /// Number of cached frames
    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }

    pub fn clear(&mut self) {
        self.worlds.clear();
        self.revision = None;
    }

    /// Recompute every frame in the scene
    pub fn refresh(&mut self, scene: &Scene) -> Result<(), SceneError> {
        self.invalidate_if_stale(scene);
        for entity in scene.entities() {
            self.resolve(scene, entity)?;
        }
        log::trace!("World cache refreshed: {} frames", self.worlds.len());
        Ok(())
    }

    /// World transform of `entity`, computed at most once per revision
    pub fn world(&mut self, scene: &Scene, entity: Entity) -> Result<Matrix, SceneError> {
        self.invalidate_if_stale(scene);
        self.resolve(scene, entity)
    }

    fn invalidate_if_stale(&mut self, scene: &Scene) {
        if self.is_stale(scene) {
            self.worlds.clear();
            self.revision = Some(scene.revision());
        }
    }

    // Walks up to the nearest cached ancestor, then composes back down,
    // caching every frame on the way.
    fn resolve(&mut self, scene: &Scene, entity: Entity) -> Result<Matrix, SceneError> {
        if let Some(world) = self.worlds.get(&entity) {
            return Ok(*world);
        }

        let mut chain = vec![entity];
        let mut base = Matrix::IDENTITY;
        let mut current = scene.parent(entity)?;
        while let Some(ancestor) = current {
            if let Some(world) = self.worlds.get(&ancestor) {
                base = *world;
                break;
            }
            chain.push(ancestor);
            current = scene.parent(ancestor)?;
        }

        for frame in chain.into_iter().rev() {
            base = scene.local(frame)? * base;
            self.worlds.insert(frame, base);
        }
        Ok(base)
    }
}
