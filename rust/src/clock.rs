//! Clock adapters: nanosecond readings and date rendering.

use chrono::{DateTime, Utc};

/// Source of nanosecond time and its human-readable rendering.
pub trait Clock: Send + Sync {
    /// Nanoseconds since the Unix epoch.
    fn now_nanos(&self) -> i64;

    /// Render a nanosecond value as `YYYY-MM-DD HH:MM:SS`.
    fn format_date_time(&self, nanos: i64) -> String;
}

fn format_utc(nanos: i64) -> String {
    DateTime::from_timestamp_nanos(nanos)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Wall clock in UTC, backed by chrono.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_nanos(&self) -> i64 {
        // chrono only represents nanoseconds up to year 2262
        Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
    }

    fn format_date_time(&self, nanos: i64) -> String {
        format_utc(nanos)
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    nanos: i64,
}

impl FixedClock {
    pub fn new(nanos: i64) -> Self {
        Self { nanos }
    }
}

impl Clock for FixedClock {
    fn now_nanos(&self) -> i64 {
        self.nanos
    }

    fn format_date_time(&self, nanos: i64) -> String {
        format_utc(nanos)
    }
}
