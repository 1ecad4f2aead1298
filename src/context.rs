//! Per-call context threaded through the hook chain.

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Typed key-value carrier scoped to a single call.
///
/// A fresh context is allocated for every call and dropped when the call
/// returns; nothing is shared across concurrent calls. Hooks attach values
/// in `before` (a start timestamp, a request id) and read them back in
/// `after`. Values are keyed by type, so each hook defines its own
/// newtype key:
///
/// ```
/// use wraith::CallContext;
///
/// struct StartedAt(std::time::Instant);
///
/// let mut cx = CallContext::new();
/// cx.insert(StartedAt(std::time::Instant::now()));
/// assert!(cx.get::<StartedAt>().is_some());
/// ```
#[derive(Default)]
pub struct CallContext {
    values: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl CallContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a value, returning the previous value of the same type if
    /// one was set.
    pub fn insert<T: Send + Sync + 'static>(&mut self, value: T) -> Option<T> {
        self.values
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|previous| previous.downcast().ok())
            .map(|boxed| *boxed)
    }

    /// Borrow a previously attached value.
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref())
    }

    /// Mutably borrow a previously attached value.
    pub fn get_mut<T: Send + Sync + 'static>(&mut self) -> Option<&mut T> {
        self.values
            .get_mut(&TypeId::of::<T>())
            .and_then(|value| value.downcast_mut())
    }

    /// Detach and return a value.
    pub fn remove<T: Send + Sync + 'static>(&mut self) -> Option<T> {
        self.values
            .remove(&TypeId::of::<T>())
            .and_then(|value| value.downcast().ok())
            .map(|boxed| *boxed)
    }

    /// Whether any value is attached.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Debug for CallContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallContext")
            .field("values", &self.values.len())
            .finish()
    }
}
