//! Sparse set storage for **components** of ECS.

use std::any;
use std::collections::HashMap;
use std::iter::Zip;
use std::ops::{Index, IndexMut};
use std::vec;

use super::{super::Entity, Component};

/// Storage for statically typed components of ECS.
///
/// Components are packed into the dense array without gaps,
/// so systems could iterate over them without touching the sparse lookup.
/// Removal moves the last element into the freed slot,
/// so iteration order is **not** stable across removals.
///
#[derive(Debug, Clone)]
pub struct ComponentPool<T>
where
    T: Component,
{
    /// Components are actually stored here.
    data: Vec<T>,
    /// `entities[i]` owns `data[i]`.
    entities: Vec<Entity>,
    lookup: HashMap<Entity, usize>,
}

impl<T> Default for ComponentPool<T>
where
    T: Component,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ComponentPool<T>
where
    T: Component,
{
    /// Creates an empty component pool.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            entities: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Creates an empty component pool with space for at least `capacity` components.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            entities: Vec::with_capacity(capacity),
            lookup: HashMap::with_capacity(capacity),
        }
    }

    /// Count of components stored in the pool.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if there is no components in the pool.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns `true` if component was already attached to the entity.
    pub fn has(&self, entity: Entity) -> bool {
        self.lookup.contains_key(&entity)
    }

    /// Attaches component to the entity.
    ///
    /// If component was already attached, nothing happens and the existing value is kept.
    /// Use [`set`](Self::set) to replace it.
    ///
    /// Returns `true` if component was attached by this call.
    ///
    pub fn add(&mut self, entity: Entity, component: T) -> bool {
        if self.has(entity) {
            return false;
        }
        self.push(entity, component);
        true
    }

    /// Attaches component to the entity, replacing the existing one.
    ///
    /// Returns previously attached component, if any.
    ///
    pub fn set(&mut self, entity: Entity, component: T) -> Option<T> {
        match self.lookup.get(&entity) {
            Some(&index) => Some(std::mem::replace(&mut self.data[index], component)),
            None => {
                self.push(entity, component);
                None
            }
        }
    }

    fn push(&mut self, entity: Entity, component: T) {
        let index = self.len();
        self.lookup.insert(entity, index);
        self.data.push(component);
        self.entities.push(entity);
        debug_assert_eq!(self.data.len(), self.lookup.len());
    }

    /// Removes component and detaches it from the entity.
    ///
    /// Last component of the dense array takes place of the removed one.
    ///
    /// Returns component that was previously attached to the entity.
    ///
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let index = self.lookup.remove(&entity)?;
        let component = self.data.swap_remove(index);
        self.entities.swap_remove(index);
        if let Some(&moved) = self.entities.get(index) {
            self.lookup.insert(moved, index);
        }
        debug_assert_eq!(self.data.len(), self.lookup.len());
        Some(component)
    }

    /// Retrieves an immutable reference to component attached to the entity.
    ///
    /// # Panics
    ///
    /// Panics if there is no component attached to the entity.
    /// Check it with [`has`](Self::has) first.
    ///
    #[track_caller]
    pub fn get(&self, entity: Entity) -> &T {
        match self.try_get(entity) {
            Some(component) => component,
            None => missing::<T>(entity),
        }
    }

    /// Retrieves a mutable reference to component attached to the entity.
    ///
    /// # Panics
    ///
    /// Panics if there is no component attached to the entity.
    /// Check it with [`has`](Self::has) first.
    ///
    #[track_caller]
    pub fn get_mut(&mut self, entity: Entity) -> &mut T {
        match self.lookup.get(&entity) {
            Some(&index) => &mut self.data[index],
            None => missing::<T>(entity),
        }
    }

    /// Retrieves an immutable reference to component attached to the entity, if any.
    pub fn try_get(&self, entity: Entity) -> Option<&T> {
        let &index = self.lookup.get(&entity)?;
        self.data.get(index)
    }

    /// Retrieves a mutable reference to component attached to the entity, if any.
    pub fn try_get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let &index = self.lookup.get(&entity)?;
        self.data.get_mut(index)
    }

    /// Dense array of entities, aligned with [`data`](Self::data).
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Dense array of components, aligned with [`entities`](Self::entities).
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable dense array of components.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Both dense arrays at once: entities are read only,
    /// so the layout of the pool cannot be changed through them.
    pub fn dense_mut(&mut self) -> (&[Entity], &mut [T]) {
        (&self.entities, &mut self.data)
    }

    /// Returns immutable iterator over all components with their entities.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.data.iter())
    }

    /// Returns mutable iterator over all components with their entities.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter().copied().zip(self.data.iter_mut())
    }

    /// Detaches all components from their entities.
    pub fn clear(&mut self) {
        self.data.clear();
        self.entities.clear();
        self.lookup.clear();
    }

    /// Returns `true` if dense arrays and sparse lookup agree with each other.
    pub fn check_invariants(&self) -> bool {
        self.data.len() == self.entities.len()
            && self.entities.len() == self.lookup.len()
            && self
                .entities
                .iter()
                .enumerate()
                .all(|(index, entity)| self.lookup.get(entity) == Some(&index))
    }
}

#[cold]
#[track_caller]
fn missing<T>(entity: Entity) -> ! {
    panic!(
        "there is no component `{}` attached to the {}",
        any::type_name::<T>(),
        entity,
    )
}

/// Owning iterator over components of the pool with their entities.
pub struct IntoIter<T>
where
    T: Component,
{
    inner: Zip<vec::IntoIter<Entity>, vec::IntoIter<T>>,
}

impl<T> Iterator for IntoIter<T>
where
    T: Component,
{
    type Item = (Entity, T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> IntoIterator for ComponentPool<T>
where
    T: Component,
{
    type Item = (Entity, T);
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.entities.into_iter().zip(self.data),
        }
    }
}

impl<T> Index<Entity> for ComponentPool<T>
where
    T: Component,
{
    type Output = T;

    fn index(&self, entity: Entity) -> &Self::Output {
        self.get(entity)
    }
}

impl<T> IndexMut<Entity> for ComponentPool<T>
where
    T: Component,
{
    fn index_mut(&mut self, entity: Entity) -> &mut Self::Output {
        self.get_mut(entity)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Config, EntityComponentManager};

    use super::*;

    fn corrupt<T>(pool: &mut ComponentPool<T>, entity: Entity)
    where
        T: Component,
    {
        let index = pool.lookup[&entity];
        pool.lookup.insert(entity, index + 1);
    }

    #[test]
    fn test_corrupted_lookup() {
        let mut pool = ComponentPool::new();
        let first = Entity::from_raw(0);
        pool.add(first, 'x');
        pool.add(Entity::from_raw(1), 'y');
        assert!(pool.check_invariants());

        corrupt(&mut pool, first);
        assert!(!pool.check_invariants());
    }

    #[test]
    #[should_panic(expected = "invariants of the pool for component `char` are broken")]
    fn test_flush_detects_corruption() {
        let mut ecm = EntityComponentManager::with_config(Config::default().with_validation(true));
        let entity = ecm.create_entity();
        ecm.add_component(entity, 'x');

        corrupt(ecm.get_pool::<char>(), entity);
        ecm.flush();
    }

    #[test]
    fn test_flush_without_validation() {
        let mut ecm = EntityComponentManager::with_config(Config::default().with_validation(false));
        let entity = ecm.create_entity();
        ecm.add_component(entity, 'x');

        corrupt(ecm.get_pool::<char>(), entity);
        ecm.flush();
        assert!(!ecm.get_pool::<char>().check_invariants());
    }
}
