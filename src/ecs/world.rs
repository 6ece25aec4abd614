//! Scene: the frame arena, built on hecs
//!
//! Every frame is a hecs entity carrying a [`Frame`] component. Shapes add a
//! [`Boundary`]; parented frames add [`Parent`] and their parent carries a
//! matching [`Children`] entry. Handles are generation-checked, so a frame
//! used after it was despawned is reported as [`SceneError::NoSuchFrame`].

use hecs::{ComponentError, Entity, EntityBuilder};

use super::{Children, Frame, Name, Parent};
use crate::collision::{Boundary, Shape, WorldBounds, collision};
use crate::core::{SceneConfig, SceneError};
use crate::math::{Axis, Handedness, Matrix, Quaternion, Vector};

/// The transform hierarchy: owns every frame and answers world-space queries.
pub struct Scene {
    inner: hecs::World,
    config: SceneConfig,
    revision: u64,
}

impl Scene {
    /// Create an empty right-handed scene
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            inner: hecs::World::new(),
            config,
            revision: 0,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn handedness(&self) -> Handedness {
        self.config.handedness
    }

    /// Counter bumped by every mutating access
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    // -------------------------------------------------------------------------
    // Creation and destruction
    // -------------------------------------------------------------------------

    /// Spawn a parentless frame
    pub fn spawn_frame(&mut self, frame: Frame) -> Entity {
        self.touch();
        let entity = self.inner.spawn((frame,));
        log::debug!("Spawned frame {entity:?}");
        entity
    }

    /// Spawn a parentless shape
    pub fn spawn_shape(&mut self, shape: Shape) -> Entity {
        self.touch();
        let entity = self.inner.spawn(shape.into_parts());
        log::debug!("Spawned shape {entity:?}");
        entity
    }

    /// Spawn a parentless frame carrying a [`Name`]
    pub fn spawn_named(&mut self, name: impl Into<String>, frame: Frame) -> Entity {
        self.touch();
        let entity = self.inner.spawn((frame, Name::new(name)));
        log::debug!("Spawned frame {entity:?}");
        entity
    }

    /// Despawn a frame that has no children.
    ///
    /// Children must be re-parented or despawned first; see
    /// [`despawn_recursive`](Self::despawn_recursive).
    pub fn despawn(&mut self, entity: Entity) -> Result<(), SceneError> {
        self.ensure_frame(entity)?;
        if !self.children(entity)?.is_empty() {
            return Err(SceneError::HasChildren(entity));
        }
        self.unlink(entity)?;
        self.inner
            .despawn(entity)
            .map_err(|_| SceneError::NoSuchFrame(entity))?;
        self.touch();
        log::debug!("Despawned frame {entity:?}");
        Ok(())
    }

    /// Despawn a frame and everything attached below it. Returns the number
    /// of frames removed.
    pub fn despawn_recursive(&mut self, entity: Entity) -> Result<usize, SceneError> {
        self.ensure_frame(entity)?;
        self.unlink(entity)?;

        let mut pending = vec![entity];
        let mut removed = 0;
        while let Some(next) = pending.pop() {
            pending.extend(self.children(next)?);
            self.inner
                .despawn(next)
                .map_err(|_| SceneError::NoSuchFrame(next))?;
            removed += 1;
        }
        self.touch();
        log::debug!("Despawned {removed} frames under {entity:?}");
        Ok(removed)
    }

    /// Spawn a copy of a frame (local transform, boundary and name) attached
    /// to the same parent.
    pub fn clone_node(&mut self, entity: Entity) -> Result<Entity, SceneError> {
        let mut builder = EntityBuilder::new();
        builder.add(self.frame(entity)?);
        if let Ok(boundary) = self.inner.get::<&Boundary>(entity) {
            builder.add(*boundary);
        }
        if let Some(name) = self.name(entity) {
            builder.add(Name::new(name));
        }
        let parent = self.parent(entity)?;

        let clone = self.inner.spawn(builder.build());
        if let Some(parent) = parent {
            self.link(clone, parent)?;
        }
        self.touch();
        log::debug!("Cloned {entity:?} as {clone:?}");
        Ok(clone)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.ensure_frame(entity).is_ok()
    }

    /// Number of live frames
    pub fn len(&self) -> u32 {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Every live frame
    pub fn entities(&self) -> Vec<Entity> {
        self.inner
            .query::<&Frame>()
            .iter()
            .map(|(entity, _)| entity)
            .collect()
    }

    // -------------------------------------------------------------------------
    // Components
    // -------------------------------------------------------------------------

    /// Copy of a frame's local state
    pub fn frame(&self, entity: Entity) -> Result<Frame, SceneError> {
        self.inner
            .get::<&Frame>(entity)
            .map(|frame| *frame)
            .map_err(|_| SceneError::NoSuchFrame(entity))
    }

    /// Mutable access to a frame, for the [`Transformable`](super::Transformable) mutators
    pub fn frame_mut(&mut self, entity: Entity) -> Result<hecs::RefMut<'_, Frame>, SceneError> {
        self.touch();
        self.inner
            .get::<&mut Frame>(entity)
            .map_err(|_| SceneError::NoSuchFrame(entity))
    }

    /// Copy of a shape's boundary
    pub fn boundary(&self, entity: Entity) -> Result<Boundary, SceneError> {
        self.inner
            .get::<&Boundary>(entity)
            .map(|boundary| *boundary)
            .map_err(|e| shape_error(entity, e))
    }

    /// Mutable access to a shape's boundary, for the
    /// [`Collidable`](crate::collision::Collidable) setters
    pub fn boundary_mut(
        &mut self,
        entity: Entity,
    ) -> Result<hecs::RefMut<'_, Boundary>, SceneError> {
        self.touch();
        self.inner
            .get::<&mut Boundary>(entity)
            .map_err(|e| shape_error(entity, e))
    }

    /// Give a frame a boundary, turning it into a shape
    pub fn insert_boundary(&mut self, entity: Entity, boundary: Boundary) -> Result<(), SceneError> {
        self.ensure_frame(entity)?;
        self.touch();
        self.inner
            .insert_one(entity, boundary)
            .map_err(|_| SceneError::NoSuchFrame(entity))
    }

    pub fn set_name(&mut self, entity: Entity, name: impl Into<String>) -> Result<(), SceneError> {
        self.ensure_frame(entity)?;
        self.inner
            .insert_one(entity, Name::new(name))
            .map_err(|_| SceneError::NoSuchFrame(entity))
    }

    pub fn name(&self, entity: Entity) -> Option<String> {
        self.inner
            .get::<&Name>(entity)
            .ok()
            .map(|name| name.0.clone())
    }

    // -------------------------------------------------------------------------
    // Hierarchy
    // -------------------------------------------------------------------------

    pub fn parent(&self, entity: Entity) -> Result<Option<Entity>, SceneError> {
        self.ensure_frame(entity)?;
        match self.inner.get::<&Parent>(entity) {
            Ok(parent) => Ok(Some(parent.entity())),
            Err(ComponentError::MissingComponent(_)) => Ok(None),
            Err(ComponentError::NoSuchEntity) => Err(SceneError::NoSuchFrame(entity)),
        }
    }

    /// Direct children in attach order
    pub fn children(&self, entity: Entity) -> Result<Vec<Entity>, SceneError> {
        self.ensure_frame(entity)?;
        Ok(self
            .inner
            .get::<&Children>(entity)
            .map(|children| children.iter().copied().collect())
            .unwrap_or_default())
    }

    /// True when `ancestor` appears on the parent chain of `entity`
    pub fn is_ancestor_of(&self, ancestor: Entity, entity: Entity) -> Result<bool, SceneError> {
        let mut current = self.parent(entity)?;
        while let Some(next) = current {
            if next == ancestor {
                return Ok(true);
            }
            current = self.parent(next)?;
        }
        Ok(false)
    }

    /// Re-parent `child`, or detach it to world space with `None`.
    ///
    /// The local transform is kept, so the world placement changes with the
    /// new ancestor chain. Attaching a frame to itself or to one of its own
    /// descendants is rejected with [`SceneError::CycleDetected`].
    pub fn attach_to(&mut self, child: Entity, parent: Option<Entity>) -> Result<(), SceneError> {
        self.check_attach(child, parent)?;
        self.unlink(child)?;
        if let Some(parent) = parent {
            self.link(child, parent)?;
        }
        self.touch();
        log::debug!("Attached {child:?} to {parent:?}");
        Ok(())
    }

    /// Re-parent `child` while keeping its world placement: the local
    /// transform is rewritten relative to the new parent.
    ///
    /// Only the world matrix is preserved; the local orientation `Q` is left
    /// as it was, so [`quaternion`](Self::quaternion) follows the new chain.
    pub fn attach_to_keeping_world(
        &mut self,
        child: Entity,
        parent: Option<Entity>,
    ) -> Result<(), SceneError> {
        self.check_attach(child, parent)?;

        let world = self.world(child)?;
        let to_parent = match parent {
            Some(parent) => self
                .world(parent)?
                .inverse_affine()
                .ok_or(SceneError::SingularTransform(parent))?,
            None => Matrix::IDENTITY,
        };
        let local = world * to_parent;
        let handedness = self.config.handedness;

        let mut frame = self.frame_mut(child)?;
        // local = rotation(Q) * T, and rotation(Q) is orthonormal
        let unrotate = frame.local_quaternion().to_matrix(handedness).transpose();
        frame.set_transform(unrotate * local);
        drop(frame);

        self.attach_to(child, parent)
    }

    fn check_attach(&self, child: Entity, parent: Option<Entity>) -> Result<(), SceneError> {
        self.ensure_frame(child)?;
        let Some(parent) = parent else {
            return Ok(());
        };
        self.ensure_frame(parent)?;
        if parent == child || self.is_ancestor_of(child, parent)? {
            log::warn!("Rejected attaching {child:?} to {parent:?}: would create a cycle");
            return Err(SceneError::CycleDetected { child, parent });
        }
        Ok(())
    }

    fn link(&mut self, child: Entity, parent: Entity) -> Result<(), SceneError> {
        self.inner
            .insert_one(child, Parent::new(parent))
            .map_err(|_| SceneError::NoSuchFrame(child))?;
        let listed = match self.inner.get::<&mut Children>(parent) {
            Ok(mut children) => {
                children.add(child);
                true
            }
            Err(_) => false,
        };
        if !listed {
            self.inner
                .insert_one(parent, Children::single(child))
                .map_err(|_| SceneError::NoSuchFrame(parent))?;
        }
        Ok(())
    }

    fn unlink(&mut self, child: Entity) -> Result<(), SceneError> {
        let Some(parent) = self.parent(child)? else {
            return Ok(());
        };
        self.inner
            .remove_one::<Parent>(child)
            .map_err(|_| SceneError::NoSuchFrame(child))?;
        if let Ok(mut children) = self.inner.get::<&mut Children>(parent) {
            children.remove(child);
        }
        Ok(())
    }

    fn ensure_frame(&self, entity: Entity) -> Result<(), SceneError> {
        match self.inner.entity(entity) {
            Ok(entity_ref) if entity_ref.has::<Frame>() => Ok(()),
            _ => Err(SceneError::NoSuchFrame(entity)),
        }
    }

    // -------------------------------------------------------------------------
    // World-space queries
    // -------------------------------------------------------------------------

    /// Local placement relative to the parent
    pub fn local(&self, entity: Entity) -> Result<Matrix, SceneError> {
        Ok(self.frame(entity)?.local(self.config.handedness))
    }

    /// World transform: the local placement composed with every ancestor's,
    /// child first.
    pub fn world(&self, entity: Entity) -> Result<Matrix, SceneError> {
        let mut world = self.local(entity)?;
        let mut current = self.parent(entity)?;
        while let Some(ancestor) = current {
            world *= self.local(ancestor)?;
            current = self.parent(ancestor)?;
        }
        Ok(world)
    }

    /// World orientation: the parent's world orientation composed with the
    /// local one.
    pub fn quaternion(&self, entity: Entity) -> Result<Quaternion, SceneError> {
        let mut orientation = self.frame(entity)?.local_quaternion();
        let mut current = self.parent(entity)?;
        while let Some(ancestor) = current {
            orientation = self.frame(ancestor)?.local_quaternion() * orientation;
            current = self.parent(ancestor)?;
        }
        Ok(orientation)
    }

    /// World position
    pub fn position(&self, entity: Entity) -> Result<Vector, SceneError> {
        Ok(self.world(entity)?.position())
    }

    /// World rotation block
    pub fn rotation(&self, entity: Entity) -> Result<Matrix, SceneError> {
        Ok(self.world(entity)?.rotation())
    }

    /// A local-space vector expressed as a world direction
    pub fn orientation(&self, entity: Entity, v: Vector) -> Result<Vector, SceneError> {
        Ok(self.rotation(entity)?.direction(v))
    }

    /// World direction of a local axis
    pub fn orientation_of(&self, entity: Entity, axis: Axis) -> Result<Vector, SceneError> {
        self.orientation(entity, axis.unit())
    }

    /// World direction of the local axis named `'x'`, `'y'` or `'z'`
    pub fn orientation_char(&self, entity: Entity, axis: char) -> Result<Vector, SceneError> {
        let axis = Axis::try_from(axis).map_err(SceneError::InvalidAxis)?;
        self.orientation_of(entity, axis)
    }

    // -------------------------------------------------------------------------
    // Collision
    // -------------------------------------------------------------------------

    /// A shape's boundary resolved against its world transform
    pub fn world_bounds(&self, entity: Entity) -> Result<WorldBounds, SceneError> {
        let boundary = self.boundary(entity)?;
        Ok(WorldBounds::resolve(&boundary, &self.world(entity)?))
    }

    /// Would shape `b`, moved by `displacement`, touch shape `a`? Neither
    /// shape is modified.
    pub fn collision(&self, a: Entity, b: Entity, displacement: Vector) -> Result<bool, SceneError> {
        Ok(collision(
            &self.world_bounds(a)?,
            &self.world_bounds(b)?,
            displacement,
        ))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

fn shape_error(entity: Entity, error: ComponentError) -> SceneError {
    match error {
        ComponentError::NoSuchEntity => SceneError::NoSuchFrame(entity),
        ComponentError::MissingComponent(_) => SceneError::NotAShape(entity),
    }
}
