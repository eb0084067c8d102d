//! Lock handlers serializing access to generator state.
//!
//! Release is tied to dropping the [`LockGuard`], so the lock is let go on
//! every exit path of the critical section.

use std::sync::{Mutex, PoisonError};

trait Held {}

impl<T> Held for T {}

/// Proof of exclusive access; releases the lock when dropped.
pub struct LockGuard<'a> {
    _held: Option<Box<dyn Held + 'a>>,
}

impl<'a> LockGuard<'a> {
    /// Guard that holds nothing.
    pub fn unlocked() -> Self {
        Self { _held: None }
    }

    /// Keep `guard` alive until this value is dropped.
    pub fn holding<G: 'a>(guard: G) -> Self {
        Self {
            _held: Some(Box::new(guard)),
        }
    }
}

/// Mutual-exclusion primitive consumed by the generator.
pub trait SyncLock: Send + Sync {
    fn acquire(&self) -> LockGuard<'_>;
}

/// Real mutual exclusion over a `std::sync::Mutex`.
#[derive(Debug, Default)]
pub struct MutexLock {
    inner: Mutex<()>,
}

impl MutexLock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SyncLock for MutexLock {
    fn acquire(&self) -> LockGuard<'_> {
        // The mutex guards no data, so a poisoned lock is still usable.
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        LockGuard::holding(guard)
    }
}

/// Lock that never blocks. Valid when access is single-threaded or already
/// serialized by a lock the caller holds.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLock;

impl SyncLock for NoOpLock {
    fn acquire(&self) -> LockGuard<'_> {
        LockGuard::unlocked()
    }
}
