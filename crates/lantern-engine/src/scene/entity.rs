use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::component::{Component, EntityView, UpdateCtx};
use crate::coords::{Point, Rect};
use crate::input::InputState;
use crate::surface::Surface;

/// Index of an entity in its [`Scene`](super::Scene)'s arena.
///
/// Ids are not generational: removing an entity invalidates its id, and a
/// later spawn may reuse the slot. Callers holding ids across removals must
/// drop them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub(crate) u32);

impl EntityId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

struct ComponentSlot {
    component: Box<dyn Component>,
    /// Scene update generation this component last ran in. Guards against a
    /// second update within the same tick.
    updated_at: u64,
}

/// A positioned, scaled node owning components and child entities.
///
/// Width and height stay 0 until set explicitly or adopted from content (a
/// loaded image, measured text).
pub struct Entity {
    pub position: Point,
    pub scale: Point,
    pub width: f32,
    pub height: f32,
    pub(crate) parent: Option<EntityId>,
    pub(crate) children: Vec<EntityId>,
    slots: Vec<ComponentSlot>,
    by_type: HashMap<TypeId, usize>,
}

impl Entity {
    pub fn new() -> Self {
        Self {
            position: Point::ZERO,
            scale: Point::ONE,
            width: 0.0,
            height: 0.0,
            parent: None,
            children: Vec::new(),
            slots: Vec::new(),
            by_type: HashMap::new(),
        }
    }

    pub fn at(position: Point) -> Self {
        let mut entity = Self::new();
        entity.position = position;
        entity
    }

    pub fn sized(position: Point, width: f32, height: f32) -> Self {
        let mut entity = Self::at(position);
        entity.width = width;
        entity.height = height;
        entity
    }

    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    /// Attaches a component: records its type for lookup, runs its `init`
    /// hook against this entity, and appends it in order.
    ///
    /// A second component of the same type stays updatable/renderable but is
    /// shadowed for [`get_component`](Self::get_component) lookup.
    pub fn attach<C: Component>(&mut self, component: C) -> &mut Self {
        self.attach_boxed(Box::new(component));
        self
    }

    pub fn attach_boxed(&mut self, mut component: Box<dyn Component>) {
        let type_id = (*component).type_id();
        let Entity {
            position,
            scale,
            width,
            height,
            ..
        } = self;
        component.init(&mut EntityView {
            position,
            scale,
            width,
            height,
        });

        self.by_type.entry(type_id).or_insert(self.slots.len());
        self.slots.push(ComponentSlot {
            component,
            updated_at: 0,
        });
    }

    /// First attached component of type `C`, if any.
    pub fn get_component<C: Component>(&self) -> Option<&C> {
        let index = *self.by_type.get(&TypeId::of::<C>())?;
        (&*self.slots[index].component as &dyn Any).downcast_ref()
    }

    pub fn get_component_mut<C: Component>(&mut self) -> Option<&mut C> {
        let index = *self.by_type.get(&TypeId::of::<C>())?;
        (&mut *self.slots[index].component as &mut dyn Any).downcast_mut()
    }

    /// Runs every component not yet updated in `generation`, in attach order.
    pub(crate) fn update_components(
        &mut self,
        generation: u64,
        dt: f32,
        input: &InputState,
        scene_updated: &mut bool,
    ) -> anyhow::Result<()> {
        let Entity {
            position,
            scale,
            width,
            height,
            slots,
            ..
        } = self;

        for slot in slots.iter_mut() {
            if slot.updated_at == generation {
                continue;
            }
            slot.updated_at = generation;

            let mut ctx = UpdateCtx {
                dt,
                input,
                entity: EntityView {
                    position: &mut *position,
                    scale: &mut *scale,
                    width: &mut *width,
                    height: &mut *height,
                },
                scene_updated: &mut *scene_updated,
            };
            slot.component.update(&mut ctx)?;
        }
        Ok(())
    }

    /// Like [`update_components`](Self::update_components) but only for the
    /// first component of the given type.
    pub(crate) fn update_component_of(
        &mut self,
        type_id: TypeId,
        generation: u64,
        dt: f32,
        input: &InputState,
        scene_updated: &mut bool,
    ) -> anyhow::Result<()> {
        let Some(&index) = self.by_type.get(&type_id) else {
            return Ok(());
        };

        let Entity {
            position,
            scale,
            width,
            height,
            slots,
            ..
        } = self;
        let slot = &mut slots[index];
        if slot.updated_at == generation {
            return Ok(());
        }
        slot.updated_at = generation;

        let mut ctx = UpdateCtx {
            dt,
            input,
            entity: EntityView {
                position,
                scale,
                width,
                height,
            },
            scene_updated,
        };
        slot.component.update(&mut ctx)
    }

    pub(crate) fn render_components(
        &self,
        surface: &mut dyn Surface,
        rect: Rect,
    ) -> anyhow::Result<()> {
        for slot in &self.slots {
            slot.component.render(surface, rect)?;
        }
        Ok(())
    }

    /// Local-space bounding-box test, inclusive on all edges. Scale is not
    /// applied; the box is `position .. position + (width, height)`.
    pub fn contains(&self, point: Point) -> bool {
        let local = point - self.position;
        local.x >= 0.0 && local.x <= self.width && local.y >= 0.0 && local.y <= self.height
    }

    /// Euclidean distance between this entity's position and `point`.
    pub fn distance_to(&self, point: Point) -> f32 {
        (point - self.position).length()
    }

    pub fn distance(&self, other: &Entity) -> f32 {
        self.distance_to(other.position)
    }

    /// Bounding-box overlap, inclusive on both edges: boxes that merely touch
    /// collide.
    pub fn test_collision(&self, other: &Entity) -> bool {
        self.position.x <= other.position.x + other.width
            && other.position.x <= self.position.x + self.width
            && self.position.y <= other.position.y + other.height
            && other.position.y <= self.position.y + self.height
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

/// Recipe for a kind of entity: a default component list plus a finishing
/// hook. [`Scene::spawn`](super::Scene::spawn) attaches caller extras first,
/// then the blueprint's defaults, then runs `init`.
pub trait Blueprint {
    fn components(&self) -> Vec<Box<dyn Component>>;

    fn init(&self, entity: &mut Entity) {
        let _ = entity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::BoxFill;
    use crate::paint::Color;

    fn boxed(x: f32, y: f32, w: f32, h: f32) -> Entity {
        Entity::sized(Point::new(x, y), w, h)
    }

    // ── component lookup ──────────────────────────────────────────────────

    #[test]
    fn get_component_finds_by_type() {
        let mut e = Entity::new();
        assert!(e.get_component::<BoxFill>().is_none());

        e.attach(BoxFill::new(Color::BLACK));
        assert_eq!(e.get_component::<BoxFill>().unwrap().color, Color::BLACK);
    }

    #[test]
    fn get_component_mut_allows_edits() {
        let mut e = Entity::new();
        e.attach(BoxFill::new(Color::BLACK));

        e.get_component_mut::<BoxFill>().unwrap().color = Color::WHITE;
        assert_eq!(e.get_component::<BoxFill>().unwrap().color, Color::WHITE);
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn contains_is_inclusive_and_ignores_scale() {
        let mut e = boxed(10.0, 10.0, 20.0, 20.0);
        e.scale = Point::splat(3.0);

        assert!(e.contains(Point::new(10.0, 10.0)));
        assert!(e.contains(Point::new(30.0, 30.0)));
        assert!(!e.contains(Point::new(30.1, 30.0)));
        assert!(!e.contains(Point::new(9.9, 15.0)));
    }

    #[test]
    fn distance_is_between_positions() {
        let a = boxed(0.0, 0.0, 50.0, 50.0);
        let b = boxed(3.0, 4.0, 1.0, 1.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
        assert!((a.distance_to(Point::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }

    // ── collision ─────────────────────────────────────────────────────────

    #[test]
    fn overlapping_boxes_collide() {
        let a = boxed(0.0, 0.0, 60.0, 60.0);
        let b = boxed(50.0, 50.0, 60.0, 60.0);
        assert!(a.test_collision(&b));
    }

    #[test]
    fn separated_boxes_do_not_collide() {
        let a = boxed(0.0, 0.0, 10.0, 10.0);
        let b = boxed(20.0, 20.0, 10.0, 10.0);
        assert!(!a.test_collision(&b));
    }

    #[test]
    fn touching_edges_collide() {
        let a = boxed(0.0, 0.0, 10.0, 10.0);
        let b = boxed(10.0, 0.0, 10.0, 10.0);
        assert!(a.test_collision(&b));
    }

    #[test]
    fn collision_is_symmetric() {
        let cases = [
            (boxed(0.0, 0.0, 60.0, 60.0), boxed(50.0, 50.0, 60.0, 60.0)),
            (boxed(0.0, 0.0, 10.0, 10.0), boxed(20.0, 20.0, 10.0, 10.0)),
            (boxed(5.0, 5.0, 0.0, 0.0), boxed(5.0, 5.0, 0.0, 0.0)),
        ];
        for (a, b) in &cases {
            assert_eq!(a.test_collision(b), b.test_collision(a));
        }
    }
}
