//! World wrapper around hecs

use glam::Vec2;
use hecs::Entity;

use crate::ai::FoodItem;
use crate::ecs::{FoodSource, Nest, Position};

/// Simulation world containing food and nest entities.
///
/// An explicitly owned value: the simulation passes it into each tick,
/// nothing lives in process-wide state.
pub struct World {
    /// The underlying hecs world
    pub inner: hecs::World,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            inner: hecs::World::new(),
        }
    }

    /// Spawn an entity with the given components
    pub fn spawn(&mut self, components: impl hecs::DynamicBundle) -> Entity {
        self.inner.spawn(components)
    }

    /// Despawn an entity
    pub fn despawn(&mut self, entity: Entity) -> Result<(), hecs::NoSuchEntity> {
        self.inner.despawn(entity)
    }

    /// Get a reference to a component
    pub fn get<T: hecs::Component>(
        &self,
        entity: Entity,
    ) -> Result<hecs::Ref<'_, T>, hecs::ComponentError> {
        self.inner.get::<&T>(entity)
    }

    /// Get a mutable reference to a component
    pub fn get_mut<T: hecs::Component>(
        &mut self,
        entity: Entity,
    ) -> Result<hecs::RefMut<'_, T>, hecs::ComponentError> {
        self.inner.get::<&mut T>(entity)
    }

    /// Check if an entity exists
    pub fn contains(&self, entity: Entity) -> bool {
        self.inner.contains(entity)
    }

    /// Get the number of entities
    pub fn len(&self) -> u32 {
        self.inner.len()
    }

    /// Check if the world is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Snapshot of every non-exhausted food entity, ordered by entity id so
    /// iteration order never depends on archetype layout.
    pub fn food_items(&self) -> Vec<FoodItem> {
        let mut items: Vec<FoodItem> = self
            .inner
            .query::<(&Position, &FoodSource)>()
            .iter()
            .filter(|(_, (_, food))| !food.is_exhausted())
            .map(|(entity, (position, food))| FoodItem {
                id: entity,
                position: position.0,
                remaining: food.remaining(),
            })
            .collect();
        items.sort_by_key(|item| item.id.to_bits());
        items
    }

    /// Total food units still out in the world
    pub fn food_remaining(&self) -> u32 {
        self.inner
            .query::<&FoodSource>()
            .iter()
            .map(|(_, food)| food.remaining())
            .sum()
    }

    /// The nest entity and its position, if one has been spawned
    pub fn nest(&self) -> Option<(Entity, Vec2)> {
        self.inner
            .query::<(&Position, &Nest)>()
            .iter()
            .map(|(entity, (position, _))| (entity, position.0))
            .min_by_key(|(entity, _)| entity.to_bits())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
