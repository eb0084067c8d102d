//! unixid: sortable unique identifiers from a nanosecond clock.
//!
//! An ID is the current Unix time in nanoseconds, bumped by a correlative
//! counter when two requests land on the same clock tick. Client contexts
//! may append a session token so IDs from different sessions never collide.
//!
//! # Format
//!
//! ```text
//! ID ::= TIMESTAMP [ "." SUFFIX ]
//! TIMESTAMP ::= DIGIT+        ; i64 nanoseconds
//! SUFFIX ::= DIGIT+           ; session token
//! ```
//!
//! # Example
//!
//! ```
//! use unixid::Generator;
//!
//! let generator = Generator::new().expect("server defaults are complete");
//! let id = generator.get_new_id(); // e.g. "1624397134562544800"
//! assert!(generator.validate(&id).is_ok());
//!
//! let parsed = generator.parse("1624397134562544800.42").unwrap();
//! assert_eq!(parsed.timestamp, 1624397134562544800);
//! assert_eq!(parsed.suffix, "42");
//! ```

mod clock;
mod config;
mod error;
mod generator;
mod id;
mod lock;
mod session;
mod target;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{UnixIdError, ValidationError};
pub use generator::Generator;
pub use id::{ParsedId, is_valid, parse, parse_timestamp, to_date_string, validate};
pub use lock::{LockGuard, MutexLock, NoOpLock, SyncLock};
pub use session::{EmptySession, SessionProvider, StaticSession};
pub use target::SettableField;
