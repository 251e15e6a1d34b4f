//! Utilities for *systems* in ECS.

pub use schedule::Schedule;

use crate::error::BoxError;
use crate::EntityComponentManager;

mod schedule;

/// Result of the single run of the system.
pub type SystemResult = Result<(), BoxError>;

/// Objects of this trait represent *system* of ECS.
///
/// System borrows the pools it needs from the manager,
/// reads and writes their dense arrays and marks dying entities
/// with [`EntityComponentManager::remover`] instead of deleting them.
///
pub trait System {
    /// Name of the system, used in diagnostics.
    fn name(&self) -> &str;

    /// Handles state of the current system for one frame.
    fn run(&mut self, ecm: &EntityComponentManager, delta_time: f32) -> SystemResult;
}

/// System made of a closure. Created by [`system_fn`].
pub struct FnSystem<F> {
    name: String,
    function: F,
}

/// Wraps a closure into the [`System`] with given name.
pub fn system_fn<F>(name: impl Into<String>, function: F) -> FnSystem<F>
where
    F: FnMut(&EntityComponentManager, f32) -> SystemResult,
{
    FnSystem {
        name: name.into(),
        function,
    }
}

impl<F> System for FnSystem<F>
where
    F: FnMut(&EntityComponentManager, f32) -> SystemResult,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&mut self, ecm: &EntityComponentManager, delta_time: f32) -> SystemResult {
        (self.function)(ecm, delta_time)
    }
}
