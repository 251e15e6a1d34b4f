//! Deferred structural changes of *components*.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;

use crate::{Component, Entity, EntityComponentManager};

/// Single deferred change to be applied by the manager.
pub type Command = Box<dyn FnOnce(&mut EntityComponentManager)>;

/// Queue of structural changes recorded during the frame.
///
/// Like [`EntityRemover`](super::EntityRemover), commands are recorded
/// through a shared reference and replayed in FIFO order at the end of the frame.
/// Component changes for entities which are not alive at replay time are skipped.
///
#[derive(Default)]
pub struct CommandQueue {
    commands: RefCell<VecDeque<Command>>,
}

impl CommandQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records arbitrary change of the manager.
    pub fn push<F>(&self, command: F)
    where
        F: FnOnce(&mut EntityComponentManager) + 'static,
    {
        self.commands.borrow_mut().push_back(Box::new(command));
    }

    /// Records attachment of the component to the entity.
    ///
    /// Existing component is kept, as in [`ComponentPool::add`](crate::ComponentPool::add).
    ///
    pub fn add_component<T>(&self, entity: Entity, component: T)
    where
        T: Component,
    {
        self.push(move |ecm| {
            if alive::<T>(ecm, entity, "add") {
                ecm.add_component(entity, component);
            }
        });
    }

    /// Records attachment of the component to the entity, replacing the existing one.
    pub fn set_component<T>(&self, entity: Entity, component: T)
    where
        T: Component,
    {
        self.push(move |ecm| {
            if alive::<T>(ecm, entity, "set") {
                ecm.set_component(entity, component);
            }
        });
    }

    /// Records detachment of the component of type `T` from the entity.
    pub fn remove_component<T>(&self, entity: Entity)
    where
        T: Component,
    {
        self.push(move |ecm| {
            if alive::<T>(ecm, entity, "remove") {
                ecm.remove_component::<T>(entity);
            }
        });
    }

    /// Records creation of new entity, initialized by given closure.
    pub fn create_entity<F>(&self, init: F)
    where
        F: FnOnce(&mut EntityComponentManager, Entity) + 'static,
    {
        self.push(move |ecm| match ecm.try_create_entity() {
            Ok(entity) => init(ecm, entity),
            Err(error) => log::error!("deferred entity creation failed: {}", error),
        });
    }

    /// Count of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.borrow().len()
    }

    /// Returns `true` if nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.borrow().is_empty()
    }

    /// Takes all recorded commands in FIFO order.
    pub(crate) fn drain(&mut self) -> VecDeque<Command> {
        std::mem::take(self.commands.get_mut())
    }
}

fn alive<T>(ecm: &EntityComponentManager, entity: Entity, action: &str) -> bool
where
    T: Component,
{
    let alive = ecm.is_alive(entity);
    if !alive {
        log::warn!(
            "skipping deferred {} of `{}`: {} is not alive",
            action,
            std::any::type_name::<T>(),
            entity,
        );
    }
    alive
}

impl fmt::Debug for CommandQueue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CommandQueue")
            .field("len", &self.len())
            .finish()
    }
}
