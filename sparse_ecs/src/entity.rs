//! Utilities for *entities* in ECS.

use std::fmt;

/// Raw representation of the *entity* identifier.
pub type EntityId = u32;

/// Unique identifier of the *entity* of ECS.
///
/// Entity carries no data of its own: all of its state lives in component pools.
/// Identifiers are allocated by [`EntityComponentManager`](crate::EntityComponentManager)
/// in strictly increasing order and are never reused.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Entity(EntityId);

impl Entity {
    /// Creates entity handle from the raw identifier.
    ///
    /// Entities should normally be created by the manager;
    /// this is useful for tools and tests which work with pools directly.
    ///
    pub const fn from_raw(id: EntityId) -> Self {
        Self(id)
    }

    /// Raw identifier of the entity.
    pub const fn id(self) -> EntityId {
        self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "entity #{}", self.0)
    }
}

impl From<Entity> for EntityId {
    fn from(entity: Entity) -> Self {
        entity.0
    }
}
