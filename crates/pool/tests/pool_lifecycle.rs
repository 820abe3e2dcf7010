//! Pool lifecycle tests.
//!
//! Walks the take/release/expand/destroy/clear protocol end to end and
//! verifies which lifecycle hook fires for every object the pool touches.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use parking_lot::Mutex;

use nebula_pool::{Error, Lifecycle, Pool, PoolConfig, ReleaseOutcome, Result};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Trace {
    created: AtomicU32,
    taken: AtomicU32,
    released: AtomicU32,
    destroyed: Mutex<Vec<String>>,
}

/// Lifecycle producing labeled string objects and recording every hook.
struct TracingLifecycle {
    trace: Arc<Trace>,
}

impl TracingLifecycle {
    fn new() -> (Self, Arc<Trace>) {
        let trace = Arc::new(Trace::default());
        (
            Self {
                trace: Arc::clone(&trace),
            },
            trace,
        )
    }
}

impl Lifecycle for TracingLifecycle {
    type Object = String;

    fn id(&self) -> &str {
        "traced"
    }

    fn create(&self) -> Result<String> {
        let n = self.trace.created.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("x{n}"))
    }

    fn on_take(&self, _obj: &mut String) {
        self.trace.taken.fetch_add(1, Ordering::SeqCst);
    }

    fn on_release(&self, _obj: &mut String) {
        self.trace.released.fetch_add(1, Ordering::SeqCst);
    }

    fn on_destroy(&self, obj: String) {
        self.trace.destroyed.lock().push(obj);
    }
}

fn traced_pool(capacity: usize, max_capacity: usize) -> (Pool<TracingLifecycle>, Arc<Trace>) {
    let (lifecycle, trace) = TracingLifecycle::new();
    let pool = Pool::new(lifecycle, PoolConfig::new(capacity, max_capacity)).unwrap();
    (pool, trace)
}

/// Lifecycle whose `create` can be switched into a failing mode.
struct FlakyLifecycle {
    failing: Arc<AtomicBool>,
}

impl Lifecycle for FlakyLifecycle {
    type Object = u32;

    fn id(&self) -> &str {
        "flaky"
    }

    fn create(&self) -> Result<u32> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::creation("flaky", "backend offline"));
        }
        Ok(1)
    }
}

// ---------------------------------------------------------------------------
// Fixed-size pool walkthrough
// ---------------------------------------------------------------------------

/// A pool built with capacity == max_capacity retains exactly `capacity`
/// objects; the next release is destroyed, not stored, and expansion is
/// impossible.
#[test]
fn fixed_size_pool_walkthrough() {
    let (pool, trace) = traced_pool(2, 2);

    let x1 = pool.take().unwrap();
    let x2 = pool.take().unwrap();
    let x3 = pool.take().unwrap();
    assert_eq!(trace.created.load(Ordering::SeqCst), 3);
    assert_eq!(pool.live_size(), 0);

    assert_eq!(pool.release(x1), ReleaseOutcome::Retained);
    assert_eq!(pool.release(x2), ReleaseOutcome::Retained);
    assert_eq!(pool.live_size(), 2);

    // Free-list full and the capacity cannot grow: 2 + 1 is not
    // strictly below 2.
    assert_eq!(pool.release(x3), ReleaseOutcome::Destroyed);
    assert_eq!(pool.live_size(), 2);
    assert_eq!(pool.capacity(), 2);

    assert_eq!(*trace.destroyed.lock(), vec!["x3".to_string()]);
    assert_eq!(trace.released.load(Ordering::SeqCst), 2);
    assert!(!pool.expand(1));
}

#[test]
fn released_object_sees_exactly_one_hook() {
    let (pool, trace) = traced_pool(1, 1);
    for _ in 0..5 {
        let obj = pool.take().unwrap();
        pool.release(obj);
    }
    // One object lives on the free-list the whole time; nothing is ever
    // both released and destroyed.
    let released = u64::from(trace.released.load(Ordering::SeqCst));
    let destroyed = trace.destroyed.lock().len() as u64;
    assert_eq!(released + destroyed, pool.stats().total_releases);
    assert_eq!(destroyed, 0);
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

#[test]
fn clear_destroys_idle_objects_and_resets() {
    let (pool, trace) = traced_pool(10, 100);
    for obj in ["a", "b", "c"] {
        pool.release(obj.to_string());
    }
    assert_eq!(pool.live_size(), 3);

    pool.clear();

    assert_eq!(pool.live_size(), 0);
    let destroyed = trace.destroyed.lock().clone();
    assert_eq!(destroyed, ["a", "b", "c"]);
    // Capacity values survive a clear.
    assert_eq!(pool.capacity(), 10);
    assert_eq!(pool.max_capacity(), 100);

    // Clearing an empty pool invokes nothing further.
    pool.clear();
    assert_eq!(trace.destroyed.lock().len(), 3);
}

// ---------------------------------------------------------------------------
// Reuse order and hooks
// ---------------------------------------------------------------------------

#[test]
fn takes_come_back_most_recent_first() {
    let (pool, _) = traced_pool(10, 100);
    for obj in ["a", "b", "c"] {
        pool.release(obj.to_string());
    }
    assert_eq!(pool.take().unwrap(), "c");
    assert_eq!(pool.take().unwrap(), "b");
    assert_eq!(pool.take().unwrap(), "a");
}

#[test]
fn on_take_runs_for_fresh_and_reused_objects() {
    let (pool, trace) = traced_pool(10, 100);

    let fresh = pool.take().unwrap();
    assert_eq!(trace.taken.load(Ordering::SeqCst), 1);

    pool.release(fresh);
    let _reused = pool.take().unwrap();
    assert_eq!(trace.taken.load(Ordering::SeqCst), 2);
    assert_eq!(trace.created.load(Ordering::SeqCst), 1);
}

// ---------------------------------------------------------------------------
// Creation failure
// ---------------------------------------------------------------------------

#[test]
fn creation_failure_is_transient() {
    let failing = Arc::new(AtomicBool::new(true));
    let pool = Pool::new(
        FlakyLifecycle {
            failing: Arc::clone(&failing),
        },
        PoolConfig::default(),
    )
    .unwrap();

    let err = pool.take().unwrap_err();
    assert_eq!(err.pool_id(), Some("flaky"));
    assert_eq!(pool.live_size(), 0);

    // Once the backend recovers, the same pool serves takes again.
    failing.store(false, Ordering::SeqCst);
    assert_eq!(pool.take().unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Checkout guards
// ---------------------------------------------------------------------------

#[test]
fn checkout_guard_releases_on_drop() {
    let (pool, trace) = traced_pool(10, 100);
    {
        let mut guard = pool.checkout().unwrap();
        guard.push_str("-used");
        assert_eq!(pool.live_size(), 0);
    }
    assert_eq!(pool.live_size(), 1);
    assert_eq!(trace.released.load(Ordering::SeqCst), 1);

    // The mutated object is what comes back out.
    assert_eq!(pool.take().unwrap(), "x1-used");
}

#[test]
fn detached_guard_object_never_returns() {
    let (pool, trace) = traced_pool(10, 100);
    let guard = pool.checkout().unwrap();
    let obj = guard.into_inner();
    assert_eq!(obj, "x1");
    assert_eq!(pool.live_size(), 0);
    assert_eq!(trace.released.load(Ordering::SeqCst), 0);
    assert!(trace.destroyed.lock().is_empty());
}
