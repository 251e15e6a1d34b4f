//! Utilities for *components* in ECS.

use std::any::{self, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

pub use pool::*;
pub use registry::*;

mod pool;
mod registry;
mod tests;

/// Objects of this trait represent *component* of ECS.
///
/// Components should be just POD (plain old data).
/// Stable type tag of every component kind is its [`ComponentId`].
///
pub trait Component: Any {}

impl<T> Component for T where T: Any {}

/// Unique identifier of the *component* type of ECS.
///
/// Same for all instances of one component type during the whole process lifetime.
///
#[derive(Debug, Clone, Copy)]
pub struct ComponentId {
    type_id: TypeId,
    name: &'static str,
}

impl ComponentId {
    /// Returns identifier of the component type `T`.
    pub fn of<T>() -> Self
    where
        T: Component,
    {
        Self {
            type_id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }

    /// Name of the component type, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ComponentId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ComponentId {}

impl Hash for ComponentId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name)
    }
}
