//! Storage of entities and their components.

use std::cell::{Ref, RefMut};
use std::collections::HashMap;

use crate::config::Config;
use crate::deferred::{CommandQueue, EntityRemover};
use crate::error::{Error, Result};
use crate::{Component, ComponentPool, Entity, EntityId, PoolRegistry};

/// Storage for entities and components of ECS.
///
/// Owns identifier allocation, all component pools and the deferred queues.
/// Systems should never delete entities directly: they mark them with
/// [`remover`](Self::remover) and the frame driver calls [`flush`](Self::flush)
/// once all systems of the frame have finished.
///
pub struct EntityComponentManager {
    /// Next identifier to be allocated; `u64` to detect exhaustion of `u32` space.
    next_id: u64,
    /// Storage for all alive entities.
    entities: Vec<Entity>,
    /// Position of every alive entity in `entities`.
    alive: HashMap<Entity, usize>,
    /// Map with ids of components and their pools.
    registry: PoolRegistry,
    remover: EntityRemover,
    commands: CommandQueue,
    config: Config,
}

impl Default for EntityComponentManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityComponentManager {
    /// Creates new manager with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates new manager with given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            next_id: 0,
            entities: Vec::new(),
            alive: HashMap::new(),
            registry: PoolRegistry::new(),
            remover: EntityRemover::new(),
            commands: CommandQueue::new(),
            config,
        }
    }

    /// Configuration of this manager.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Creates new entity without any components.
    ///
    /// # Panics
    ///
    /// Panics if all entity identifiers were already allocated.
    /// Use [`try_create_entity`](Self::try_create_entity) to handle it.
    ///
    pub fn create_entity(&mut self) -> Entity {
        match self.try_create_entity() {
            Ok(entity) => entity,
            Err(error) => panic!("{}", error),
        }
    }

    /// Creates new entity without any components.
    ///
    /// # Errors
    ///
    /// An error is returned if all entity identifiers were already allocated.
    /// Identifiers are never reused.
    ///
    pub fn try_create_entity(&mut self) -> Result<Entity> {
        let id = EntityId::try_from(self.next_id).map_err(|_| Error::EntityIdsExhausted)?;
        self.next_id += 1;

        let entity = Entity::from_raw(id);
        self.alive.insert(entity, self.entities.len());
        self.entities.push(entity);
        Ok(entity)
    }

    /// Creates new entity and returns a handle to fill it with components.
    ///
    /// # Panics
    ///
    /// Panics if all entity identifiers were already allocated.
    ///
    pub fn spawn(&mut self) -> EntityMut<'_> {
        let entity = self.create_entity();
        EntityMut { ecm: self, entity }
    }

    /// Returns a handle which attaches and detaches components of the entity.
    pub fn entity(&mut self, entity: Entity) -> EntityMut<'_> {
        EntityMut { ecm: self, entity }
    }

    /// All alive entities, in no particular order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Count of alive entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if the entity was created and not deleted yet.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive.contains_key(&entity)
    }

    /// Retrieves pool for the component type `T`, creating it on first use.
    pub fn get_pool<T>(&mut self) -> &mut ComponentPool<T>
    where
        T: Component,
    {
        let capacity = self.config.pool_capacity();
        self.registry.get_or_create(capacity)
    }

    /// Makes sure the pool for the component type `T` exists,
    /// so it could be borrowed by systems later.
    pub fn register<T>(&mut self)
    where
        T: Component,
    {
        self.get_pool::<T>();
    }

    /// Count of registered pools.
    pub fn pool_count(&self) -> usize {
        self.registry.len()
    }

    /// Immutably borrows pool for the component type `T`.
    ///
    /// Many systems could read the same pool simultaneously.
    ///
    /// # Errors
    ///
    /// An error is returned if pool was not registered
    /// or if it is already borrowed mutably.
    ///
    pub fn borrow<T>(&self) -> Result<Ref<'_, ComponentPool<T>>>
    where
        T: Component,
    {
        self.registry.borrow()
    }

    /// Mutably borrows pool for the component type `T`.
    ///
    /// # Errors
    ///
    /// An error is returned if pool was not registered
    /// or if it is already borrowed.
    ///
    pub fn borrow_mut<T>(&self) -> Result<RefMut<'_, ComponentPool<T>>>
    where
        T: Component,
    {
        self.registry.borrow_mut()
    }

    /// Attaches component to the entity if it has no component of this type yet.
    ///
    /// Deleted entities are never attached to again.
    ///
    /// Returns `true` if component was attached by this call.
    ///
    pub fn add_component<T>(&mut self, entity: Entity, component: T) -> bool
    where
        T: Component,
    {
        if !self.check_alive::<T>(entity) {
            return false;
        }
        self.get_pool().add(entity, component)
    }

    /// Attaches component to the entity, replacing the existing one.
    ///
    /// Deleted entities are never attached to again.
    ///
    /// Returns previously attached component, if any.
    ///
    pub fn set_component<T>(&mut self, entity: Entity, component: T) -> Option<T>
    where
        T: Component,
    {
        if !self.check_alive::<T>(entity) {
            return None;
        }
        self.get_pool().set(entity, component)
    }

    fn check_alive<T>(&self, entity: Entity) -> bool
    where
        T: Component,
    {
        let alive = self.is_alive(entity);
        if !alive {
            log::warn!(
                "component `{}` is not attached: {} is not alive",
                std::any::type_name::<T>(),
                entity,
            );
        }
        alive
    }

    /// Removes component of type `T` and detaches it from the entity.
    ///
    /// Returns component that was previously attached to the entity.
    ///
    pub fn remove_component<T>(&mut self, entity: Entity) -> Option<T>
    where
        T: Component,
    {
        self.get_pool::<T>().remove(entity)
    }

    /// Queue of entities marked for deletion.
    pub fn remover(&self) -> &EntityRemover {
        &self.remover
    }

    /// Queue of deferred component changes.
    pub fn commands(&self) -> &CommandQueue {
        &self.commands
    }

    /// Deletes the entity immediately from every pool and from the list of alive entities.
    ///
    /// Cost depends on count of registered pools, not on count of components of the entity.
    ///
    /// Returns `true` if the entity was alive.
    ///
    pub(crate) fn delete_entity(&mut self, entity: Entity) -> bool {
        let pools = self.registry.remove_entity(entity);
        let index = match self.alive.remove(&entity) {
            Some(index) => index,
            None => return false,
        };
        self.entities.swap_remove(index);
        if let Some(&moved) = self.entities.get(index) {
            self.alive.insert(moved, index);
        }
        log::trace!("deleted {} with {} components", entity, pools);
        true
    }

    /// Deletes all entities queued in the [`remover`](Self::remover), in FIFO order.
    ///
    /// Returns count of entities which were actually deleted.
    ///
    pub fn delete_entities(&mut self) -> usize {
        let queue = self.remover.drain();
        queue
            .into_iter()
            .filter(|&entity| self.delete_entity(entity))
            .count()
    }

    /// Applies all changes recorded in the [`commands`](Self::commands), in FIFO order.
    ///
    /// Commands recorded while applying are kept for the next call.
    ///
    /// Returns count of applied commands.
    ///
    pub fn apply_commands(&mut self) -> usize {
        let commands = self.commands.drain();
        let count = commands.len();
        for command in commands {
            command(self);
        }
        count
    }

    /// Synchronization point of the frame.
    ///
    /// Applies deferred component changes first, then deletes queued entities.
    ///
    /// # Panics
    ///
    /// Panics if validation is enabled and some pool is corrupted.
    ///
    pub fn flush(&mut self) {
        let applied = self.apply_commands();
        let deleted = self.delete_entities();
        if applied > 0 || deleted > 0 {
            log::debug!(
                "flushed {} commands and {} deletions, {} entities alive",
                applied,
                deleted,
                self.entities.len(),
            );
        }

        if self.config.enable_validation() {
            if let Some(id) = self.registry.find_corrupted() {
                panic!("invariants of the pool for component `{}` are broken", id);
            }
        }
    }
}

/// Handle of the single entity, borrowed from the manager.
///
/// Forwards component changes to [`EntityComponentManager`].
///
pub struct EntityMut<'a> {
    ecm: &'a mut EntityComponentManager,
    entity: Entity,
}

impl<'a> EntityMut<'a> {
    /// Entity this handle refers to.
    pub fn id(&self) -> Entity {
        self.entity
    }

    /// See [`EntityComponentManager::add_component`].
    pub fn add<T>(&mut self, component: T) -> bool
    where
        T: Component,
    {
        self.ecm.add_component(self.entity, component)
    }

    /// See [`EntityComponentManager::set_component`].
    pub fn set<T>(&mut self, component: T) -> Option<T>
    where
        T: Component,
    {
        self.ecm.set_component(self.entity, component)
    }

    /// See [`EntityComponentManager::remove_component`].
    pub fn remove<T>(&mut self) -> Option<T>
    where
        T: Component,
    {
        self.ecm.remove_component::<T>(self.entity)
    }

    /// Returns `true` if component of type `T` is attached to the entity.
    pub fn has<T>(&mut self) -> bool
    where
        T: Component,
    {
        self.ecm.get_pool::<T>().has(self.entity)
    }

    /// Attaches component and returns the handle back, for chaining.
    pub fn with<T>(mut self, component: T) -> Self
    where
        T: Component,
    {
        self.add(component);
        self
    }
}
