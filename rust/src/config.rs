//! Generator configuration.
//!
//! A [`Config`] bundles the three collaborators a [`Generator`](crate::Generator)
//! consumes. Server and single-threaded runtimes differ only in which lock
//! they pick; the ID algorithm is identical.

use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;

use crate::clock::{Clock, SystemClock};
use crate::lock::{MutexLock, NoOpLock, SyncLock};
use crate::session::{EmptySession, SessionProvider};

static SYSTEM_CLOCK: Lazy<Arc<dyn Clock>> = Lazy::new(|| Arc::new(SystemClock));
static EMPTY_SESSION: Lazy<Arc<dyn SessionProvider>> = Lazy::new(|| Arc::new(EmptySession));
static NOOP_LOCK: Lazy<Arc<dyn SyncLock>> = Lazy::new(|| Arc::new(NoOpLock));

/// Collaborators for a generator. Unset entries are rejected by
/// [`Generator::from_config`](crate::Generator::from_config).
#[derive(Clone, Default)]
pub struct Config {
    pub clock: Option<Arc<dyn Clock>>,
    pub session: Option<Arc<dyn SessionProvider>>,
    pub lock: Option<Arc<dyn SyncLock>>,
}

impl Config {
    /// System clock, no session suffix, real mutual exclusion.
    pub fn server() -> Self {
        Self {
            clock: Some(Arc::clone(&*SYSTEM_CLOCK)),
            session: Some(Arc::clone(&*EMPTY_SESSION)),
            lock: Some(Arc::new(MutexLock::new())),
        }
    }

    /// System clock, no session suffix, no locking. For runtimes where the
    /// generator is never shared across threads.
    pub fn single_threaded() -> Self {
        Self {
            lock: Some(Arc::clone(&*NOOP_LOCK)),
            ..Self::server()
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_session(mut self, session: Arc<dyn SessionProvider>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_lock(mut self, lock: Arc<dyn SyncLock>) -> Self {
        self.lock = Some(lock);
        self
    }

    /// Declare that callers already serialize access with `external`.
    ///
    /// The generator then locks nothing itself, so calling it while holding
    /// `external` cannot deadlock. Atomicity relative to other users of
    /// `external` is the caller's responsibility.
    pub fn adopt_lock<T: ?Sized>(self, external: &Mutex<T>) -> Self {
        let _ = external;
        self.with_lock(Arc::clone(&*NOOP_LOCK))
    }
}
