//! Capacity-bounded object pool built on a LIFO free-list.
//!
//! `Pool<L>` calls `L::create`, `L::on_take`, `L::on_release` and
//! `L::on_destroy` directly, removing the need for closure factories.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::PoolConfig;
use crate::error::Result;
use crate::guard::Guard;
use crate::lifecycle::Lifecycle;

// ---------------------------------------------------------------------------
// ReleaseOutcome
// ---------------------------------------------------------------------------

/// What `release` did with the returned object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The object was stored on the free-list for reuse.
    Retained,
    /// The pool was full and could not expand; the object was destroyed.
    Destroyed,
}

impl ReleaseOutcome {
    /// Stable lowercase name, usable as a log field.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retained => "retained",
            Self::Destroyed => "destroyed",
        }
    }
}

impl std::fmt::Display for ReleaseOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Pool internals
// ---------------------------------------------------------------------------

/// Pool statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolStats {
    /// Total takes that handed out an object.
    pub total_takes: u64,
    /// Total release calls, retained and destroyed alike.
    pub total_releases: u64,
    /// Total objects ever created.
    pub created: u64,
    /// Total takes served from the free-list.
    pub reused: u64,
    /// Total objects ever destroyed.
    pub destroyed: u64,
    /// Current number of idle objects on the free-list.
    pub idle: usize,
    /// Current soft capacity.
    pub capacity: usize,
    /// Hard capacity ceiling.
    pub max_capacity: usize,
}

/// Mutable pool state, all behind one lock.
struct State<T> {
    /// LIFO free-list. Its length is the pool's live size.
    idle: Vec<T>,
    capacity: usize,
    max_capacity: usize,
    total_takes: u64,
    total_releases: u64,
    created: u64,
    reused: u64,
    destroyed: u64,
}

impl<T> State<T> {
    fn new(config: PoolConfig) -> Self {
        Self {
            // No eager reservation: capacity may be usize::MAX.
            idle: Vec::new(),
            capacity: config.capacity,
            max_capacity: config.max_capacity,
            total_takes: 0,
            total_releases: 0,
            created: 0,
            reused: 0,
            destroyed: 0,
        }
    }

    /// Grow `capacity` by `size` if the result stays strictly below
    /// `max_capacity`. No mutation on failure.
    fn try_expand(&mut self, size: usize) -> bool {
        match self.capacity.checked_add(size) {
            Some(next) if next < self.max_capacity => {
                self.capacity = next;
                true
            }
            _ => false,
        }
    }

    fn stats(&self) -> PoolStats {
        PoolStats {
            total_takes: self.total_takes,
            total_releases: self.total_releases,
            created: self.created,
            reused: self.reused,
            destroyed: self.destroyed,
            idle: self.idle.len(),
            capacity: self.capacity,
            max_capacity: self.max_capacity,
        }
    }
}

/// Inner shared state for the pool.
struct PoolInner<L: Lifecycle> {
    lifecycle: L,
    state: Mutex<State<L::Object>>,
}

// ---------------------------------------------------------------------------
// Pool<L>
// ---------------------------------------------------------------------------

/// Generic capacity-bounded object pool.
///
/// Fills lazily: objects are created one at a time when `take` finds the
/// free-list empty, and retained up to `capacity` when released. A release
/// that finds the free-list at capacity makes the pool try to expand by one
/// toward `max_capacity`; once that is no longer possible, released objects
/// are destroyed instead of stored.
///
/// Cloning is cheap and every clone views the same state.
pub struct Pool<L: Lifecycle> {
    inner: Arc<PoolInner<L>>,
}

impl<L: Lifecycle> Clone for Pool<L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L: Lifecycle> std::fmt::Debug for Pool<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.inner.state.lock().stats();
        f.debug_struct("Pool")
            .field("pool_id", &self.inner.lifecycle.id())
            .field("stats", &stats)
            .finish()
    }
}

impl<L: Lifecycle> Pool<L> {
    /// Create a new pool driven by the given lifecycle.
    ///
    /// No objects are created up front; the free-list starts empty.
    ///
    /// # Errors
    /// Returns an error if `config` is invalid (capacity above
    /// max_capacity).
    pub fn new(lifecycle: L, config: PoolConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(PoolInner {
                lifecycle,
                state: Mutex::new(State::new(config)),
            }),
        })
    }

    /// Identifier of the lifecycle driving this pool.
    #[must_use]
    pub fn id(&self) -> &str {
        self.inner.lifecycle.id()
    }

    /// Take an object out of the pool.
    ///
    /// Pops the most recently released object if one is idle, otherwise
    /// creates a fresh one via [`Lifecycle::create`]; a creation error
    /// propagates unchanged and leaves the pool untouched. Either way
    /// `on_take` runs on the object before it is handed out. The caller
    /// owns the object until it is passed back via
    /// [`release`](Self::release); the pool keeps no record of outstanding
    /// objects.
    pub fn take(&self) -> Result<L::Object> {
        let reused = {
            let mut state = self.inner.state.lock();
            let obj = state.idle.pop();
            if obj.is_some() {
                state.total_takes += 1;
                state.reused += 1;
            }
            obj
        };

        let mut obj = match reused {
            Some(obj) => obj,
            None => {
                let obj = self.inner.lifecycle.create()?;
                {
                    let mut state = self.inner.state.lock();
                    state.total_takes += 1;
                    state.created += 1;
                }
                obj
            }
        };

        self.inner.lifecycle.on_take(&mut obj);
        Ok(obj)
    }

    /// Return an object to the pool.
    ///
    /// While the free-list holds fewer than `capacity` objects the object
    /// is stored (most recent on top) and `on_release` runs on it. A
    /// release that finds the free-list at capacity first attempts to
    /// expand the capacity by one; if that fails the object is handed to
    /// `on_destroy` instead and never stored. An object passes through
    /// exactly one of the two hooks.
    pub fn release(&self, obj: L::Object) -> ReleaseOutcome {
        {
            let mut state = self.inner.state.lock();
            state.total_releases += 1;
            if state.idle.len() < state.capacity || state.try_expand(1) {
                state.idle.push(obj);
                if let Some(stored) = state.idle.last_mut() {
                    self.inner.lifecycle.on_release(stored);
                }
                return ReleaseOutcome::Retained;
            }
            state.destroyed += 1;
            #[cfg(feature = "tracing")]
            tracing::debug!(
                pool_id = %self.inner.lifecycle.id(),
                live_size = state.idle.len(),
                capacity = state.capacity,
                "Pool full, destroying released object"
            );
        }
        self.inner.lifecycle.on_destroy(obj);
        ReleaseOutcome::Destroyed
    }

    /// Grow the soft capacity by `size`.
    ///
    /// Succeeds only while the grown capacity stays strictly below
    /// `max_capacity`, so expansion can never make the two equal. Returns
    /// `false` (and changes nothing) otherwise.
    pub fn expand(&self, size: usize) -> bool {
        self.inner.state.lock().try_expand(size)
    }

    /// Destroy an object instead of returning it to the pool.
    ///
    /// Delegates to [`Lifecycle::on_destroy`]; no free-list or capacity
    /// bookkeeping happens beyond the `destroyed` counter.
    pub fn destroy(&self, obj: L::Object) {
        self.inner.state.lock().destroyed += 1;
        self.inner.lifecycle.on_destroy(obj);
    }

    /// Discard every idle object.
    ///
    /// Each drained object is handed to `on_destroy` and the live size
    /// ends at 0. Capacity values are unchanged. Clearing an empty pool
    /// invokes nothing.
    pub fn clear(&self) {
        let drained: Vec<L::Object> = {
            let mut state = self.inner.state.lock();
            state.destroyed += state.idle.len() as u64;
            state.idle.drain(..).collect()
        };
        #[cfg(feature = "tracing")]
        if !drained.is_empty() {
            tracing::debug!(
                pool_id = %self.inner.lifecycle.id(),
                discarded = drained.len(),
                "Cleared pool"
            );
        }
        for obj in drained {
            self.inner.lifecycle.on_destroy(obj);
        }
    }

    /// Take an object wrapped in an RAII guard that releases it on drop.
    ///
    /// [`Guard::into_inner`] detaches the object instead; a detached
    /// object never returns to the pool.
    pub fn checkout(&self) -> Result<Guard<L::Object>> {
        let obj = self.take()?;
        let pool = self.clone();
        Ok(Guard::new(obj, move |obj| {
            let _ = pool.release(obj);
        }))
    }

    /// Number of idle objects currently on the free-list.
    #[must_use]
    pub fn live_size(&self) -> usize {
        self.inner.state.lock().idle.len()
    }

    /// `true` while the free-list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_size() == 0
    }

    /// Current soft capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.state.lock().capacity
    }

    /// Current hard capacity ceiling.
    #[must_use]
    pub fn max_capacity(&self) -> usize {
        self.inner.state.lock().max_capacity
    }

    /// Get current pool statistics.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.inner.state.lock().stats()
    }

    /// Add registration increments onto both capacity fields (saturating).
    /// Used by the registry when a key is registered more than once.
    pub(crate) fn raise_limits(&self, capacity: usize, max_capacity: usize) {
        let mut state = self.inner.state.lock();
        state.capacity = state.capacity.saturating_add(capacity);
        state.max_capacity = state.max_capacity.saturating_add(max_capacity);
    }
}
