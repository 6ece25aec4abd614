//! Frame hierarchy components
//!
//! Parent links are non-owning: a `Parent` names another frame by its
//! generation-checked handle, so a stale link is reported by the scene
//! instead of dereferenced.

use hecs::Entity;
use smallvec::SmallVec;

/// Parent component - the frame this one is placed relative to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent(pub Entity);

impl Parent {
    #[must_use]
    pub const fn new(entity: Entity) -> Self {
        Self(entity)
    }

    #[must_use]
    pub const fn entity(&self) -> Entity {
        self.0
    }
}

/// Children component - frames attached to this one, in attach order
#[derive(Debug, Clone, Default)]
pub struct Children(pub SmallVec<[Entity; 8]>);

impl Children {
    #[must_use]
    pub fn single(child: Entity) -> Self {
        let mut children = SmallVec::new();
        children.push(child);
        Self(children)
    }

    /// Add a child, ignoring duplicates
    pub fn add(&mut self, child: Entity) {
        if !self.contains(child) {
            self.0.push(child);
        }
    }

    /// Remove a child, keeping the order of the rest
    pub fn remove(&mut self, child: Entity) -> bool {
        if let Some(pos) = self.0.iter().position(|&e| e == child) {
            self.0.remove(pos);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn contains(&self, child: Entity) -> bool {
        self.0.contains(&child)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_add_remove() {
        let mut world = hecs::World::new();
        let a = world.spawn(());
        let b = world.spawn(());

        let mut children = Children::single(a);
        children.add(b);
        assert_eq!(children.len(), 2);

        // No duplicates
        children.add(a);
        assert_eq!(children.len(), 2);

        assert!(children.remove(a));
        assert!(!children.remove(a));
        assert!(!children.contains(a));
        assert!(children.contains(b));
        assert_eq!(children.iter().copied().collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn test_parent_entity() {
        let mut world = hecs::World::new();
        let e = world.spawn(());
        assert_eq!(Parent::new(e).entity(), e);
    }
}
