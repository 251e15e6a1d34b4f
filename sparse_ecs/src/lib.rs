//! Sparse set Entity Component System (ECS) for small simulation loops.
//!
//! Components of every type live in their own [`ComponentPool`],
//! densely packed for fast iteration. Entities are deleted only
//! at the end of the frame, through the [`EntityRemover`] queue.

pub use component::{Component, ComponentId, ComponentPool, ErasedPool, PoolRegistry};
pub use config::Config;
pub use deferred::{CommandQueue, EntityRemover};
pub use entity::{Entity, EntityId};
pub use error::{Error, Result};
pub use manager::{EntityComponentManager, EntityMut};
pub use system::{system_fn, Schedule, System, SystemResult};

pub mod component;
pub mod config;
pub mod deferred;
pub mod error;
pub mod system;

mod entity;
mod manager;
