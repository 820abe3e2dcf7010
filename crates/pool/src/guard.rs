//! RAII guard for checked-out objects

/// RAII guard wrapping an object checked out of a pool.
///
/// Dropping the guard runs the on-drop callback, which for
/// [`Pool::checkout`](crate::pool::Pool::checkout) releases the object back
/// to its pool. Use `into_inner()` to take ownership without triggering the
/// callback; the object then never returns to the pool.
pub struct Guard<T> {
    object: Option<T>,
    on_drop: Option<Box<dyn FnOnce(T) + Send>>,
}

impl<T> Guard<T> {
    /// Create a new guard wrapping `object` with a drop callback.
    pub fn new<F>(object: T, on_drop: F) -> Self
    where
        F: FnOnce(T) + Send + 'static,
    {
        Self {
            object: Some(object),
            on_drop: Some(Box::new(on_drop)),
        }
    }

    /// Take the object out of the guard, preventing the drop callback.
    #[must_use]
    pub fn into_inner(mut self) -> T {
        self.on_drop.take(); // prevent callback
        self.object.take().expect("guard used after into_inner")
    }
}

impl<T> std::ops::Deref for Guard<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.object.as_ref().expect("guard used after into_inner")
    }
}

impl<T> std::ops::DerefMut for Guard<T> {
    fn deref_mut(&mut self) -> &mut T {
        self.object.as_mut().expect("guard used after into_inner")
    }
}

impl<T> Drop for Guard<T> {
    fn drop(&mut self) {
        if let (Some(object), Some(on_drop)) = (self.object.take(), self.on_drop.take()) {
            on_drop(object);
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard")
            .field("object", &self.object)
            .finish()
    }
}
