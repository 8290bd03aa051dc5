//! Line and file rules.

use super::input::{newline, Input, ParseErrorKind, ParseResult};
use super::tokens;
use crate::schema::Event;

/// Parse one log record, keeping its exact source text.
///
/// The raw text is peeked without moving the cursor, then the structured
/// fields are parsed from the same starting point. Both must cover the same
/// span: content left over after the event type is an error.
pub fn line(input: Input<'_>) -> ParseResult<'_, Event> {
    let original_line = input.peek_line();

    let (timestamp, rest) = tokens::date(input)?;
    let (_, rest) = tokens::separator(rest)?;
    let (user_id, rest) = tokens::user(rest)?;
    let (event_type, rest) = tokens::event(rest)?;

    // No field rule consumes '\n', so the parsed span is a prefix of the line
    if input.consumed_until(&rest).len() != original_line.len() {
        return Err(rest.error(ParseErrorKind::UnexpectedTrailingInput));
    }

    let event = Event {
        timestamp,
        user_id,
        event_type,
        original_line: original_line.to_string(),
    };
    Ok((event, rest))
}

/// Parse zero or more records joined by single newlines.
///
/// After the last record the input must end, either directly or after one
/// final newline. The first failing record aborts the whole parse.
pub fn file(input: Input<'_>) -> ParseResult<'_, Vec<Event>> {
    let mut events = Vec::new();
    if input.is_empty() {
        return Ok((events, input));
    }

    let mut rest = input;
    loop {
        let (event, after_line) = line(rest)?;
        events.push(event);

        if after_line.is_empty() {
            return Ok((events, after_line));
        }

        let (_, after_newline) = newline(after_line)?;
        if after_newline.is_empty() {
            return Ok((events, after_newline));
        }

        rest = after_newline;
    }
}
