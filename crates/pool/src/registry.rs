//! Registry of shared pools looked up by caller-chosen keys.

use std::any::Any;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::config::PoolConfig;
use crate::error::{Error, Result};
use crate::lifecycle::Lifecycle;
use crate::pool::Pool;

// ---------------------------------------------------------------------------
// Type-erased pool wrapper
// ---------------------------------------------------------------------------

/// Type-erased pool interface so the registry can store pools of different
/// lifecycle types in a single map.
trait AnyPool: Send + Sync {
    /// Access the wrapper as `&dyn Any` for downcasting to `TypedPool<L>`.
    fn as_any(&self) -> &dyn Any;

    /// Discard every idle object in the pool.
    fn clear(&self);
}

/// Concrete adapter from `Pool<L>` to `AnyPool`.
struct TypedPool<L: Lifecycle> {
    pool: Pool<L>,
}

impl<L: Lifecycle> AnyPool for TypedPool<L> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clear(&self) {
        self.pool.clear();
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Owned registry of pools shared by key.
///
/// Keys are opaque strings chosen by the caller; one key maps to one pool
/// for the registry's lifetime, regardless of how many callers ask for it.
/// Independent registries are fully isolated from each other. Entries are
/// only ever removed by [`shutdown`](Self::shutdown).
#[derive(Default)]
pub struct Registry {
    /// Pools indexed by caller-chosen key.
    pools: DashMap<String, Arc<dyn AnyPool>>,
}

impl Registry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the pool registered under `key`, creating it if absent.
    ///
    /// On a fresh key the pool is built from `lifecycle` and `config`; a
    /// construction failure inserts nothing, so a later identical call
    /// behaves as if this one never happened. On a key that already has a
    /// pool, `lifecycle` is dropped unused (callbacks are never replaced
    /// or merged) and the config's `capacity` and `max_capacity` are added
    /// onto the existing pool's limits. The lookup-or-create is atomic:
    /// concurrent calls for one key produce a single pool.
    ///
    /// # Errors
    /// Returns an error if `config` is invalid, or if `key` is already
    /// bound to a pool driven by a different lifecycle type. The typed
    /// pool is recovered by downcast, so sharing a key requires the exact
    /// lifecycle type `L`, not merely the same object type.
    pub fn get_or_create<L: Lifecycle>(
        &self,
        key: impl Into<String>,
        lifecycle: L,
        config: PoolConfig,
    ) -> Result<Pool<L>> {
        let key = key.into();
        match self.pools.entry(key) {
            Entry::Occupied(entry) => {
                let pool = entry
                    .get()
                    .as_any()
                    .downcast_ref::<TypedPool<L>>()
                    .map(|typed| typed.pool.clone())
                    .ok_or_else(|| Error::type_mismatch(entry.key().clone()))?;
                config.validate()?;
                pool.raise_limits(config.capacity, config.max_capacity);
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    key = %entry.key(),
                    added_capacity = config.capacity,
                    added_max_capacity = config.max_capacity,
                    "Raised limits of existing pool"
                );
                Ok(pool)
            }
            Entry::Vacant(entry) => {
                let pool = Pool::new(lifecycle, config)?;
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    key = %entry.key(),
                    capacity = config.capacity,
                    max_capacity = config.max_capacity,
                    "Registered pool"
                );
                entry.insert(Arc::new(TypedPool { pool: pool.clone() }));
                Ok(pool)
            }
        }
    }

    /// `true` if `key` has a registered pool.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.pools.contains_key(key)
    }

    /// Number of registered pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// `true` if no pools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Registered keys, sorted for stable output.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.pools.iter().map(|entry| entry.key().clone()).collect();
        keys.sort();
        keys
    }

    /// Clear every pool and drop all entries.
    ///
    /// Each pool's idle objects pass through `on_destroy`. Pool handles
    /// already held by callers stay usable afterwards; they are just no
    /// longer shared through this registry.
    pub fn shutdown(&self) {
        let pools: Vec<Arc<dyn AnyPool>> = self
            .pools
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        for pool in pools {
            pool.clear();
        }

        self.pools.clear();
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("pool_count", &self.pools.len())
            .finish()
    }
}
