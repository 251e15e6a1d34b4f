//! Deferred deletion of *entities*.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::Entity;

/// Queue of entities marked for deletion during the frame.
///
/// Entities are enqueued through a shared reference,
/// so the remover could be used while pools are borrowed by systems.
/// Queued entity stays fully alive until the manager flushes the queue.
///
#[derive(Debug)]
pub struct EntityRemover {
    queue: RefCell<VecDeque<Entity>>,
}

impl EntityRemover {
    pub(crate) fn new() -> Self {
        Self {
            queue: RefCell::new(VecDeque::new()),
        }
    }

    /// Marks the entity for deletion at the end of the frame.
    ///
    /// Marking the same entity twice is harmless.
    ///
    pub fn add(&self, entity: Entity) {
        self.queue.borrow_mut().push_back(entity);
    }

    /// Count of queued entries, duplicates included.
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Returns `true` if the entity is queued for deletion.
    pub fn contains(&self, entity: Entity) -> bool {
        self.queue.borrow().contains(&entity)
    }

    /// Takes all queued entities in FIFO order.
    pub(crate) fn drain(&mut self) -> VecDeque<Entity> {
        std::mem::take(self.queue.get_mut())
    }
}
