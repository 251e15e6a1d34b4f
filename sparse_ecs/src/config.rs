//! Configuration utilities for the entity component manager.

use semver::Version;

/// Name of this ECS library.
pub const ENGINE_NAME: &str = env!("CARGO_CRATE_NAME", "library must be compiled by Cargo");

const ENGINE_VERSION_STR: &str = env!("CARGO_PKG_VERSION", "library must be compiled by Cargo");
lazy_static::lazy_static! {
    /// Semver version of this ECS library.
    pub static ref ENGINE_VERSION: Version = Version::parse(ENGINE_VERSION_STR)
        .unwrap_or_else(|_| Version::new(0, 0, 0));
}

/// Capacity hint used for lazily created pools by default.
pub const DEFAULT_POOL_CAPACITY: usize = 20;

/// This struct represents configuration of the
/// [`EntityComponentManager`](crate::EntityComponentManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pool_capacity: usize,
    enable_validation: bool,
}

impl Config {
    /// Creates new configuration with given pool capacity and validation usage.
    pub const fn new(pool_capacity: usize, enable_validation: bool) -> Self {
        Self {
            pool_capacity,
            enable_validation,
        }
    }

    /// Initial capacity of every lazily created pool.
    pub const fn pool_capacity(&self) -> usize {
        self.pool_capacity
    }

    /// If invariants of all pools will be checked after each flush (useful for debugging).
    pub const fn enable_validation(&self) -> bool {
        self.enable_validation
    }

    /// Replaces initial capacity of lazily created pools.
    pub const fn with_pool_capacity(mut self, pool_capacity: usize) -> Self {
        self.pool_capacity = pool_capacity;
        self
    }

    /// Enables or disables validation of pools after each flush.
    pub const fn with_validation(mut self, enable_validation: bool) -> Self {
        self.enable_validation = enable_validation;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY, cfg!(debug_assertions))
    }
}
