//! Utilities for managing pools of differently typed components.

use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;

use crate::error::{Error, Result};

use super::{super::Entity, Component, ComponentId, ComponentPool};

/// Type-erased view of the [`ComponentPool`].
///
/// Exposes only operations which do not need to know the component type,
/// so pools of different components can live in one collection.
///
pub trait ErasedPool {
    /// Identifier of the component type stored in this pool.
    fn component_id(&self) -> ComponentId;

    /// Detaches component from the entity, if any.
    ///
    /// Returns `true` if component was attached to the entity.
    ///
    fn remove_entity(&mut self, entity: Entity) -> bool;

    /// Returns `true` if component was attached to the entity.
    fn has_entity(&self, entity: Entity) -> bool;

    /// Count of components stored in the pool.
    fn len(&self) -> usize;

    /// Returns `true` if there is no components in the pool.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// See [`ComponentPool::check_invariants`].
    fn check_invariants(&self) -> bool;

    /// Upcast used to recover the typed pool.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast used to recover the typed pool.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> ErasedPool for ComponentPool<T>
where
    T: Component,
{
    fn component_id(&self) -> ComponentId {
        ComponentId::of::<T>()
    }

    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn has_entity(&self, entity: Entity) -> bool {
        self.has(entity)
    }

    fn len(&self) -> usize {
        ComponentPool::len(self)
    }

    fn check_invariants(&self) -> bool {
        ComponentPool::check_invariants(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Registry of all component pools of ECS.
///
/// Every pool is stored under the identifier of its component type.
/// Pools are wrapped into [`RefCell`] so systems could hold
/// several pools at the same time through a shared reference to the registry.
///
#[derive(Default)]
#[repr(transparent)]
pub struct PoolRegistry {
    pools: HashMap<ComponentId, RefCell<Box<dyn ErasedPool>>>,
}

impl PoolRegistry {
    /// Creates new empty registry.
    pub fn new() -> Self {
        Self {
            pools: HashMap::new(),
        }
    }

    /// Count of registered pools.
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Returns `true` if no pool was registered yet.
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Returns `true` if pool for the component type `T` was registered.
    pub fn contains<T>(&self) -> bool
    where
        T: Component,
    {
        self.pools.contains_key(&ComponentId::of::<T>())
    }

    /// Retrieves pool for the component type `T`,
    /// creating it with given capacity if it was not registered yet.
    pub fn get_or_create<T>(&mut self, capacity: usize) -> &mut ComponentPool<T>
    where
        T: Component,
    {
        let id = ComponentId::of::<T>();
        let cell = self.pools.entry(id).or_insert_with(|| {
            log::trace!("creating pool for `{}` with capacity {}", id, capacity);
            let pool: Box<dyn ErasedPool> = Box::new(ComponentPool::<T>::with_capacity(capacity));
            RefCell::new(pool)
        });
        downcast_mut(&mut **cell.get_mut())
    }

    /// Retrieves pool for the component type `T`, if it was registered.
    pub fn get_mut<T>(&mut self) -> Option<&mut ComponentPool<T>>
    where
        T: Component,
    {
        let cell = self.pools.get_mut(&ComponentId::of::<T>())?;
        Some(downcast_mut(&mut **cell.get_mut()))
    }

    /// Immutably borrows pool for the component type `T`.
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
        let id = ComponentId::of::<T>();
        let cell = self.cell(id)?;
        let pool = cell.try_borrow().map_err(|_| Error::AlreadyBorrowed {
            component: id.name(),
        })?;
        Ok(Ref::map(pool, |pool| downcast_ref(&**pool)))
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
        let id = ComponentId::of::<T>();
        let cell = self.cell(id)?;
        let pool = cell.try_borrow_mut().map_err(|_| Error::AlreadyBorrowed {
            component: id.name(),
        })?;
        Ok(RefMut::map(pool, |pool| downcast_mut(&mut **pool)))
    }

    fn cell(&self, id: ComponentId) -> Result<&RefCell<Box<dyn ErasedPool>>> {
        self.pools.get(&id).ok_or(Error::Unregistered {
            component: id.name(),
        })
    }

    /// Detaches components of all types from the entity.
    ///
    /// Returns count of pools which contained the entity.
    ///
    pub fn remove_entity(&mut self, entity: Entity) -> usize {
        self.pools
            .values_mut()
            .map(|pool| pool.get_mut().remove_entity(entity))
            .filter(|&removed| removed)
            .count()
    }

    /// Returns `true` if component of any type is attached to the entity.
    ///
    /// # Panics
    ///
    /// Panics if some pool is currently borrowed mutably.
    ///
    pub fn has_entity(&self, entity: Entity) -> bool {
        self.pools
            .values()
            .any(|pool| pool.borrow().has_entity(entity))
    }

    /// Returns identifier of the first pool with broken invariants, if any.
    pub fn find_corrupted(&mut self) -> Option<ComponentId> {
        for pool in self.pools.values_mut() {
            let pool = pool.get_mut();
            if !pool.check_invariants() {
                return Some(pool.component_id());
            }
        }
        None
    }
}

fn downcast_ref<'a, T>(pool: &'a (dyn ErasedPool + 'static)) -> &'a ComponentPool<T>
where
    T: Component,
{
    pool.as_any()
        .downcast_ref()
        .expect("pool is registered under foreign component id")
}

fn downcast_mut<'a, T>(pool: &'a mut (dyn ErasedPool + 'static)) -> &'a mut ComponentPool<T>
where
    T: Component,
{
    pool.as_any_mut()
        .downcast_mut()
        .expect("pool is registered under foreign component id")
}
