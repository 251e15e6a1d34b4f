//! Buffers for structural changes which must not happen in the middle of the frame.
//!
//! Systems record their intent here while they iterate over pools,
//! and [`EntityComponentManager::flush`](crate::EntityComponentManager::flush)
//! replays it after all systems of the frame have finished.

pub use commands::CommandQueue;
pub use remover::EntityRemover;

mod commands;
mod remover;
