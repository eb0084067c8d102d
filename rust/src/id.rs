//! ID grammar: validation, parsing and date rendering.
//!
//! Format: `TIMESTAMP[.SUFFIX]`, both parts non-empty ASCII digit runs.
//! `TIMESTAMP` is the emitted nanosecond value as an `i64`; `SUFFIX` is an
//! opaque session token.

use std::fmt;

use serde::Serialize;

use crate::clock::Clock;
use crate::error::{UnixIdError, ValidationError};

/// Length of `YYYY-MM-DD HH:MM`.
const DATE_MINUTE_LEN: usize = 16;

/// Parsed ID components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedId {
    pub timestamp: i64,
    /// Session token; empty when the ID has no separator.
    pub suffix: String,
}

impl ParsedId {
    pub fn has_suffix(&self) -> bool {
        !self.suffix.is_empty()
    }
}

impl fmt::Display for ParsedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.suffix.is_empty() {
            write!(f, "{}", self.timestamp)
        } else {
            write!(f, "{}.{}", self.timestamp, self.suffix)
        }
    }
}

/// Check an ID against the grammar without converting anything.
///
/// Digit runs are not range-checked here; [`parse`] reports that as
/// [`UnixIdError::Format`].
pub fn validate(id: &str) -> Result<(), ValidationError> {
    let bytes = id.as_bytes();
    let (Some(&first), Some(&last)) = (bytes.first(), bytes.last()) else {
        return Err(ValidationError::InvalidCharacter);
    };
    if first == b'.' || last == b'.' {
        return Err(ValidationError::InvalidCharacter);
    }

    let mut separators = 0;
    for &b in bytes {
        if b == b'.' {
            separators += 1;
            if separators > 1 {
                return Err(ValidationError::TooManySeparators);
            }
        } else if !b.is_ascii_digit() {
            return Err(ValidationError::InvalidCharacter);
        }
    }

    Ok(())
}

/// Returns `true` if `id` satisfies the grammar.
pub fn is_valid(id: &str) -> bool {
    validate(id).is_ok()
}

fn split(id: &str) -> (&str, &str) {
    id.split_once('.').unwrap_or((id, ""))
}

fn to_timestamp(digits: &str) -> Result<i64, UnixIdError> {
    digits
        .parse::<i64>()
        .map_err(|_| UnixIdError::Format(digits.to_string()))
}

/// Validate an ID and extract only its timestamp.
pub fn parse_timestamp(id: &str) -> Result<i64, UnixIdError> {
    validate(id)?;
    to_timestamp(split(id).0)
}

/// Parse an ID into its timestamp and suffix.
pub fn parse(id: &str) -> Result<ParsedId, UnixIdError> {
    validate(id)?;
    let (timestamp, suffix) = split(id);
    Ok(ParsedId {
        timestamp: to_timestamp(timestamp)?,
        suffix: suffix.to_string(),
    })
}

/// Render the timestamp of `id` as `YYYY-MM-DD HH:MM` using `clock`.
///
/// Renderings shorter than that are returned whole.
pub fn to_date_string(id: &str, clock: Option<&dyn Clock>) -> Result<String, UnixIdError> {
    let nanos = parse_timestamp(id)?;
    let clock = clock.ok_or(UnixIdError::ClockUnset)?;

    let mut date_time = clock.format_date_time(nanos);
    if let Some((cut, _)) = date_time.char_indices().nth(DATE_MINUTE_LEN) {
        date_time.truncate(cut);
    }
    Ok(date_time)
}
