//! Nanosecond ID generator.
//!
//! Each ID is the current clock reading in nanoseconds, disambiguated by a
//! correlative counter when consecutive readings land on the same tick, and
//! optionally followed by `.` and a session token.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use once_cell::sync::OnceCell;
use tracing::{debug, trace, warn};

use crate::clock::Clock;
use crate::config::Config;
use crate::error::{UnixIdError, ValidationError};
use crate::id::{self, ParsedId};
use crate::lock::SyncLock;
use crate::session::{self, SessionProvider};
use crate::target;

/// Thread-safe ID generator.
///
/// Share one instance (e.g. behind an `Arc`) between all callers: the
/// collision tracking state is per instance, so separate instances may issue
/// the same ID.
pub struct Generator {
    clock: Arc<dyn Clock>,
    session: Arc<dyn SessionProvider>,
    lock: Arc<dyn SyncLock>,
    // Only touched while `lock` is held; atomics keep the no-op lock sound.
    last_unix_nano: AtomicI64,
    correlative: AtomicI64,
    last_emitted: AtomicI64,
    session_token: OnceCell<String>,
}

impl Generator {
    /// Create a generator with server defaults: system clock, no session
    /// suffix, real mutual exclusion.
    pub fn new() -> Result<Self, UnixIdError> {
        Self::from_config(Config::server())
    }

    /// Create a generator from explicit collaborators.
    pub fn from_config(config: Config) -> Result<Self, UnixIdError> {
        let clock = config.clock.ok_or(UnixIdError::Configuration("clock"))?;
        let session = config
            .session
            .ok_or(UnixIdError::Configuration("session provider"))?;
        let lock = config.lock.ok_or(UnixIdError::Configuration("lock"))?;

        debug!("unixid generator created");

        Ok(Self {
            clock,
            session,
            lock,
            last_unix_nano: AtomicI64::new(0),
            correlative: AtomicI64::new(0),
            last_emitted: AtomicI64::new(i64::MIN),
            session_token: OnceCell::new(),
        })
    }

    fn next_unix_nano(&self) -> i64 {
        let now = self.clock.now_nanos().max(0);

        let correlative = if now == self.last_unix_nano.load(Ordering::Relaxed) {
            let c = self.correlative.load(Ordering::Relaxed) + 1;
            trace!(now, correlative = c, "same clock tick");
            c
        } else {
            0
        };
        self.correlative.store(correlative, Ordering::Relaxed);
        self.last_unix_nano.store(now, Ordering::Relaxed);

        let mut emitted = now.saturating_add(correlative);
        let previous = self.last_emitted.load(Ordering::Relaxed);
        if emitted <= previous {
            emitted = previous.saturating_add(1);
        }
        self.last_emitted.store(emitted, Ordering::Relaxed);

        emitted
    }

    fn resolve_session_token(&self) -> Option<&str> {
        if let Some(token) = self.session_token.get() {
            return Some(token);
        }

        let token = self.session.session_token().filter(|t| !t.is_empty())?;
        if !session::is_valid_token(&token) {
            warn!(token = %token, "ignoring session token that is not a digit run");
            return None;
        }

        debug!(token = %token, "session token resolved");
        Some(self.session_token.get_or_init(|| token).as_str())
    }

    /// Generate a new unique ID.
    ///
    /// Within one generator, timestamps never decrease and no ID repeats,
    /// even with many concurrent callers.
    pub fn get_new_id(&self) -> String {
        let _guard = self.lock.acquire();

        let mut out = self.next_unix_nano().to_string();
        if let Some(token) = self.resolve_session_token() {
            out.push('.');
            out.push_str(token);
        }
        out
    }

    /// Write a new ID into `target`.
    ///
    /// Supported targets are `String`, `Option<String>`, `Arc<Mutex<String>>`
    /// and boxed [`SettableField`](crate::SettableField)s. Anything else is
    /// left untouched.
    pub fn set_new_id(&self, target: &mut dyn Any) {
        match target::resolve(target) {
            Some(field) => field.set_string(self.get_new_id()),
            None => trace!("set_new_id: unsupported target, nothing written"),
        }
    }

    /// Generate `n` IDs.
    pub fn next_n(&self, n: usize) -> Vec<String> {
        self.ids().take(n).collect()
    }

    /// Endless stream of new IDs.
    pub fn ids(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::repeat_with(move || self.get_new_id())
    }

    /// Last raw clock reading and current correlative counter.
    pub fn state(&self) -> (i64, i64) {
        let _guard = self.lock.acquire();
        (
            self.last_unix_nano.load(Ordering::Relaxed),
            self.correlative.load(Ordering::Relaxed),
        )
    }

    pub fn validate(&self, id: &str) -> Result<(), ValidationError> {
        id::validate(id)
    }

    pub fn parse(&self, id: &str) -> Result<ParsedId, UnixIdError> {
        id::parse(id)
    }

    /// Render the timestamp of `id` as `YYYY-MM-DD HH:MM` with this
    /// generator's clock.
    pub fn to_date_string(&self, id: &str) -> Result<String, UnixIdError> {
        id::to_date_string(id, Some(self.clock.as_ref()))
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("last_unix_nano", &self.last_unix_nano.load(Ordering::Relaxed))
            .field("correlative", &self.correlative.load(Ordering::Relaxed))
            .field("session_token", &self.session_token.get())
            .finish_non_exhaustive()
    }
}
