//! Process-wide, lazily created connection handles.
//!
//! The protocol is classic double-checked initialisation: the cached handle is
//! read without taking the init lock; only when it is absent does a caller
//! take the lock, re-check, and run the initialiser. [`double_checked`] is
//! written against two small traits so the same protocol can be driven by
//! `std` primitives in production and by model-checked primitives in tests.

use std::sync::{Arc, Mutex, OnceLock};

/// Storage for the shared handle.
pub trait HandleSlot<C: ?Sized> {
    /// Current handle, if one was stored.
    fn load(&self) -> Option<Arc<C>>;
    /// Store `handle`. Called at most once, under the init gate.
    fn store(&self, handle: Arc<C>);
}

/// Mutual exclusion around the slow path.
pub trait InitGate {
    /// Run `f` while holding the gate.
    fn enter<R>(&self, f: impl FnOnce() -> R) -> R;
}

impl<C: ?Sized> HandleSlot<C> for OnceLock<Arc<C>> {
    fn load(&self) -> Option<Arc<C>> {
        self.get().cloned()
    }

    fn store(&self, handle: Arc<C>) {
        let _ = self.set(handle);
    }
}

impl InitGate for Mutex<()> {
    fn enter<R>(&self, f: impl FnOnce() -> R) -> R {
        // The guarded value is `()`, so a poisoned lock carries no broken state.
        let _guard = self
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f()
    }
}

/// Return the handle in `slot`, creating it with `init` if absent.
///
/// `init` runs at most once per successful initialisation; a failed `init`
/// stores nothing and the error is returned to this caller only.
///
/// # Errors
/// Propagates the error returned by `init`.
pub fn double_checked<C, S, G, E, F>(slot: &S, gate: &G, init: F) -> Result<Arc<C>, E>
where
    C: ?Sized,
    S: HandleSlot<C>,
    G: InitGate,
    F: FnOnce() -> Result<Arc<C>, E>,
{
    if let Some(handle) = slot.load() {
        return Ok(handle);
    }
    gate.enter(|| {
        if let Some(handle) = slot.load() {
            return Ok(handle);
        }
        let handle = init()?;
        slot.store(Arc::clone(&handle));
        Ok(handle)
    })
}

/// A lazily created handle shared for the lifetime of the process.
///
/// Suitable for a `static`:
///
/// ```rust
/// use feedline_core::connection::SharedConnection;
///
/// static CLIENT: SharedConnection<String> = SharedConnection::new();
///
/// let a = CLIENT.get_or_try_init(|| Ok::<_, ()>("client".to_string())).unwrap();
/// let b = CLIENT.get_or_try_init(|| Ok::<_, ()>("other".to_string())).unwrap();
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
/// ```
pub struct SharedConnection<C> {
    handle: OnceLock<Arc<C>>,
    init: Mutex<()>,
}

impl<C> SharedConnection<C> {
    /// Create an empty cell.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            handle: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// Current handle without initialising.
    #[must_use]
    pub fn get(&self) -> Option<Arc<C>> {
        self.handle.load()
    }

    /// Return the shared handle, creating it with `init` on first use.
    ///
    /// # Errors
    /// Propagates the error returned by `init`; nothing is cached on failure.
    pub fn get_or_try_init<E, F>(&self, init: F) -> Result<Arc<C>, E>
    where
        F: FnOnce() -> Result<C, E>,
    {
        double_checked(&self.handle, &self.init, || init().map(Arc::new))
    }
}

impl<C> Default for SharedConnection<C> {
    fn default() -> Self {
        Self::new()
    }
}
