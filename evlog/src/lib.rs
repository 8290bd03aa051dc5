//! evlog: user event log parsing and querying.
//!
//! Parses `YYYY-MM-DDTHH:MM:SS - User <id> Event: <type>` logs into typed
//! events (keeping every source line verbatim) and selects them by user,
//! event type and time range.

pub mod config;
pub mod error;
pub mod parser;
pub mod query;
pub mod schema;

pub use config::{Config, EVLOG_ROOT_VAR};
pub use error::{Error, Result};
pub use parser::{
    parse, parse_line, parse_path, validate_date, validate_event_type, validate_user_id,
    ParseError, ParseErrorKind,
};
pub use query::{EventQuery, SortOrder};
pub use schema::{Event, EventLog, EventType};
