//! Utilities for ECS error handling.

use std::error::Error as StdError;

use thiserror::Error;

/// Result of any ECS operation which can return an error.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type returned by system to the schedule.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// General error type of ECS.
///
/// Only recoverable conditions are represented here:
/// misuse of the pool contract (such as retrieving absent component) panics instead.
///
#[derive(Debug, Error)]
pub enum Error {
    #[error("all entity identifiers were already allocated")]
    EntityIdsExhausted,

    #[error("pool for component `{component}` was not registered")]
    Unregistered { component: &'static str },

    #[error("pool for component `{component}` is already borrowed")]
    AlreadyBorrowed { component: &'static str },

    #[error("system `{name}` failed: {source}")]
    System { name: String, source: BoxError },
}
