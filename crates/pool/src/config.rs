//! Pool configuration

use crate::error::{Error, Result};

/// Sizing configuration for a [`Pool`](crate::pool::Pool).
///
/// `capacity` is the soft target for how many idle objects the pool retains;
/// `max_capacity` is the hard ceiling `capacity` may grow toward under
/// release pressure. Both may only ever increase over the pool's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PoolConfig {
    /// Soft target for the number of retained idle objects
    pub capacity: usize,
    /// Hard ceiling that `capacity` may grow toward
    pub max_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: 10,
            max_capacity: 100,
        }
    }
}

impl PoolConfig {
    /// Create a configuration with explicit limits
    #[must_use]
    pub fn new(capacity: usize, max_capacity: usize) -> Self {
        Self {
            capacity,
            max_capacity,
        }
    }

    /// Set the soft capacity target
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the hard capacity ceiling
    #[must_use]
    pub fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Validate the configuration
    ///
    /// `capacity == max_capacity` is allowed and yields a fixed-size pool
    /// that can never expand.
    pub fn validate(&self) -> Result<()> {
        if self.capacity > self.max_capacity {
            return Err(Error::configuration(format!(
                "capacity ({}) cannot exceed max_capacity ({})",
                self.capacity, self.max_capacity
            )));
        }
        Ok(())
    }
}
