//! Entity arena and tree traversal.
//!
//! Entities live in a slab indexed by [`EntityId`]; parent/child links are
//! plain indices, so the tree needs no reference counting and no interior
//! mutability. Update and render both walk roots in insertion order.

mod entity;

pub use entity::{Blueprint, Entity, EntityId};

use std::any::TypeId;

use crate::component::Component;
use crate::coords::{Point, Rect};
use crate::input::InputState;
use crate::surface::Surface;

/// Per-tick inputs handed to [`State`](crate::state::State) and scene updates.
pub struct Tick<'a> {
    /// Seconds since the previous tick.
    pub dt: f32,
    pub input: &'a InputState,
}

/// All entities of the active state.
///
/// A fresh scene is created on every state switch and discarded with it;
/// entities have no destroy hook beyond [`remove`](Self::remove).
pub struct Scene {
    entries: Vec<Option<Entity>>,
    free: Vec<u32>,
    roots: Vec<EntityId>,
    /// Monotonic update-pass counter; components compare against it instead
    /// of carrying a reset-every-tick boolean. Starts at 1 so a fresh
    /// component (stamped 0) is always due.
    generation: u64,
    /// Set by components to force a redraw even when the state's update says
    /// nothing changed. The runtime clears it after each tick.
    pub updated: bool,
    /// Suppresses the full-surface clear before rendering.
    pub stop_clear: bool,
    pub(crate) has_rendered: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            free: Vec::new(),
            roots: Vec::new(),
            generation: 1,
            updated: false,
            stop_clear: false,
            has_rendered: false,
        }
    }

    fn insert(&mut self, entity: Entity) -> EntityId {
        match self.free.pop() {
            Some(index) => {
                self.entries[index as usize] = Some(entity);
                EntityId(index)
            }
            None => {
                let index = self.entries.len() as u32;
                self.entries.push(Some(entity));
                EntityId(index)
            }
        }
    }

    /// Adds a root entity; roots update and render in insertion order.
    pub fn add(&mut self, mut entity: Entity) -> EntityId {
        entity.parent = None;
        let id = self.insert(entity);
        self.roots.push(id);
        id
    }

    /// Adds `entity` as the last child of `parent`. Falls back to a root if
    /// the parent id is stale.
    pub fn add_child(&mut self, parent: EntityId, entity: Entity) -> EntityId {
        if self.get(parent).is_none() {
            log::warn!("add_child: parent {parent:?} is gone, adding as root");
            return self.add(entity);
        }

        let mut entity = entity;
        entity.parent = Some(parent);
        let id = self.insert(entity);
        if let Some(parent) = self.get_mut(parent) {
            parent.children.push(id);
        }
        id
    }

    /// Moves an existing entity under a new parent (`None` makes it a root).
    /// No cycle checking is performed; callers must not adopt an entity into
    /// its own subtree.
    pub fn adopt(&mut self, child: EntityId, new_parent: Option<EntityId>) {
        let Some(old_parent) = self.get(child).map(|e| e.parent) else {
            return;
        };

        match old_parent {
            Some(p) => {
                if let Some(parent) = self.get_mut(p) {
                    parent.children.retain(|&c| c != child);
                }
            }
            None => self.roots.retain(|&r| r != child),
        }

        match new_parent {
            Some(p) if self.get(p).is_some() => {
                if let Some(entity) = self.get_mut(child) {
                    entity.parent = Some(p);
                }
                if let Some(parent) = self.get_mut(p) {
                    parent.children.push(child);
                }
            }
            _ => {
                if let Some(entity) = self.get_mut(child) {
                    entity.parent = None;
                }
                self.roots.push(child);
            }
        }
    }

    /// Removes an entity and its whole subtree.
    pub fn remove(&mut self, id: EntityId) {
        let Some(parent) = self.get(id).map(|e| e.parent) else {
            return;
        };

        match parent {
            Some(p) => {
                if let Some(parent) = self.get_mut(p) {
                    parent.children.retain(|&c| c != id);
                }
            }
            None => self.roots.retain(|&r| r != id),
        }

        self.free_subtree(id);
    }

    fn free_subtree(&mut self, id: EntityId) {
        let Some(entity) = self.entries.get_mut(id.index()).and_then(Option::take) else {
            return;
        };
        self.free.push(id.0);
        for child in entity.children {
            self.free_subtree(child);
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entries.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entries.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn roots(&self) -> &[EntityId] {
        &self.roots
    }

    /// Number of live entities, children included.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Builds an entity from a blueprint and adds it as a root: caller
    /// extras attach first, then the blueprint's defaults, then its `init`
    /// hook runs.
    pub fn spawn<B: Blueprint>(
        &mut self,
        blueprint: &B,
        extras: Vec<Box<dyn Component>>,
    ) -> EntityId {
        let mut entity = Entity::new();
        for component in extras {
            entity.attach_boxed(component);
        }
        for component in blueprint.components() {
            entity.attach_boxed(component);
        }
        blueprint.init(&mut entity);
        self.add(entity)
    }

    // ── update ────────────────────────────────────────────────────────────

    /// One update pass over every entity, pre-order from the roots.
    ///
    /// Starts a new generation, so components updated by an explicit
    /// [`update_entity`](Self::update_entity) call earlier in the previous
    /// tick become due again.
    pub fn update_all(&mut self, tick: &Tick<'_>) -> anyhow::Result<()> {
        self.generation += 1;

        let mut i = 0;
        while i < self.roots.len() {
            let root = self.roots[i];
            self.update_subtree(root, tick)?;
            i += 1;
        }
        Ok(())
    }

    fn update_subtree(&mut self, id: EntityId, tick: &Tick<'_>) -> anyhow::Result<()> {
        self.update_entity(id, tick)?;

        let Some(children) = self.get(id).map(|e| e.children.clone()) else {
            return Ok(());
        };
        for child in children {
            self.update_subtree(child, tick)?;
        }
        Ok(())
    }

    /// Updates one entity's components within the current generation. Within
    /// one tick a second call is a no-op per component.
    pub fn update_entity(&mut self, id: EntityId, tick: &Tick<'_>) -> anyhow::Result<()> {
        let Some(slot) = self.entries.get_mut(id.index()) else {
            return Ok(());
        };
        let Some(mut entity) = slot.take() else {
            return Ok(());
        };

        let result =
            entity.update_components(self.generation, tick.dt, tick.input, &mut self.updated);
        self.entries[id.index()] = Some(entity);
        result
    }

    /// Updates only the first component of type `C` on `id`, subject to the
    /// same once-per-tick guard.
    pub fn update_component<C: Component>(
        &mut self,
        id: EntityId,
        tick: &Tick<'_>,
    ) -> anyhow::Result<()> {
        let Some(slot) = self.entries.get_mut(id.index()) else {
            return Ok(());
        };
        let Some(mut entity) = slot.take() else {
            return Ok(());
        };

        let result = entity.update_component_of(
            TypeId::of::<C>(),
            self.generation,
            tick.dt,
            tick.input,
            &mut self.updated,
        );
        self.entries[id.index()] = Some(entity);
        result
    }

    // ── render ────────────────────────────────────────────────────────────

    /// Renders every root subtree in insertion order.
    pub fn render_all(&self, surface: &mut dyn Surface) -> anyhow::Result<()> {
        for &root in &self.roots {
            self.render_entity(root, surface, None)?;
        }
        Ok(())
    }

    /// Renders one subtree: translate by position, scale by local scale,
    /// components first (into `rect`, defaulting to the entity's own box),
    /// then children. Children always render with their own default
    /// rectangle. The transform save/restore is paired even when a component
    /// fails.
    pub fn render_entity(
        &self,
        id: EntityId,
        surface: &mut dyn Surface,
        rect: Option<Rect>,
    ) -> anyhow::Result<()> {
        let Some(entity) = self.get(id) else {
            return Ok(());
        };

        surface.save();
        let result = (|| {
            surface.translate(entity.position);
            surface.scale(entity.scale);

            let rect = rect.unwrap_or_else(|| Rect::from_size(entity.width, entity.height));
            entity.render_components(surface, rect)?;

            for &child in entity.children() {
                self.render_entity(child, surface, None)?;
            }
            Ok(())
        })();
        surface.restore();
        result
    }

    // ── world-space queries ───────────────────────────────────────────────

    /// Position composed through the parent chain:
    /// `parent_global + local * parent_global_scale`.
    pub fn global_position(&self, id: EntityId) -> Point {
        let Some(entity) = self.get(id) else {
            return Point::ZERO;
        };
        match entity.parent {
            Some(p) => self.global_position(p) + entity.position * self.global_scale(p),
            None => entity.position,
        }
    }

    /// Scale composed through the parent chain.
    pub fn global_scale(&self, id: EntityId) -> Point {
        let Some(entity) = self.get(id) else {
            return Point::ONE;
        };
        match entity.parent {
            Some(p) => entity.scale * self.global_scale(p),
            None => entity.scale,
        }
    }

    /// Bounding-box overlap between two entities; stale ids never collide.
    pub fn test_collision(&self, a: EntityId, b: EntityId) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(a), Some(b)) => a.test_collision(b),
            _ => false,
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
