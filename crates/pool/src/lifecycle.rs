//! Object lifecycle callbacks

use crate::error::Result;

/// Lifecycle callbacks attached to a pool at construction.
///
/// Implemented by an adapter type rather than by the pooled objects
/// themselves, so any object type can be pooled unchanged. Only `create`
/// is required; the three hooks default to no-ops.
///
/// Hooks may run while the owning pool's internal lock is held. They must
/// be fast and must not call back into pool or registry operations (the
/// lock is not reentrant).
pub trait Lifecycle: Send + Sync + 'static {
    /// The pooled object type
    type Object: Send + 'static;

    /// Identifier used in log events and errors (e.g. "bullet", "db-conn").
    ///
    /// A diagnostic label, not a registry key; registry keys are chosen
    /// independently by the caller.
    fn id(&self) -> &str;

    /// Create a new object when `take` finds the free-list empty.
    ///
    /// Failures propagate unchanged out of
    /// [`Pool::take`](crate::pool::Pool::take); the pool itself adds no
    /// handling.
    fn create(&self) -> Result<Self::Object>;

    /// Called on every object handed out by `take`, whether freshly
    /// created or reused from the free-list.
    fn on_take(&self, _obj: &mut Self::Object) {}

    /// Called on an object just stored back into the free-list.
    fn on_release(&self, _obj: &mut Self::Object) {}

    /// Called on an object being discarded: released while the pool is
    /// full and cannot expand, drained by `clear`, or handed to `destroy`.
    fn on_destroy(&self, _obj: Self::Object) {}
}
