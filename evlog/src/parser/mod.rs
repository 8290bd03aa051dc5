//! Grammar for the user event log.
//!
//! # Format
//!
//! One record per line:
//!
//! ```text
//! YYYY-MM-DDTHH:MM:SS - User <id> Event: <type>
//! ```
//!
//! Records are joined by `\n`. A file may end with a single `\n` or with
//! nothing at all. `<type>` is one of `submit_form`, `click_button`,
//! `view_page`, `logout`.
//!
//! Parsing is all-or-nothing: one bad record fails the whole file.

mod input;
mod line;
mod tokens;

use std::path::Path;

pub use input::{
    all_consuming, eof, literal, newline, take_while, Input, ParseError, ParseErrorKind,
    ParseResult,
};
pub use line::{file, line};
pub use tokens::{
    date, event, event_type, separator, user, user_id, validate_date, validate_event_type,
    validate_user_id, EVENT_PREFIX, SEPARATOR, USER_PREFIX,
};

use crate::schema::{Event, EventLog};

/// Parse a complete log file.
///
/// An empty text gives an empty log. Any malformed record, or anything other
/// than a single newline after the last record, gives an error and no events.
pub fn parse(text: &str) -> Result<EventLog, ParseError> {
    tracing::debug!(bytes = text.len(), "parsing event log");

    match all_consuming(text, file) {
        Ok(events) => {
            tracing::debug!(events = events.len(), "parsed event log");
            Ok(EventLog::new(events))
        }
        Err(err) => {
            let (line, column) = err.locate(text);
            tracing::warn!(kind = ?err.kind, line, column, "event log failed to parse");
            Err(err)
        }
    }
}

/// Parse a single record with no line terminator.
pub fn parse_line(text: &str) -> Result<Event, ParseError> {
    all_consuming(text, line)
}

/// Read and parse a log file from disk.
pub fn parse_path(path: &Path) -> crate::Result<EventLog> {
    let text = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), "loaded event log");
    parse(&text).map_err(|e| crate::Error::parse(e, &text))
}
