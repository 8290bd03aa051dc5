//! Token rules: date, separator, user and event fields of a log line.

use chrono::{NaiveDateTime, Timelike};

use super::input::{
    all_consuming, literal, take_while, Input, ParseError, ParseErrorKind, ParseResult,
};
use crate::schema::EventType;

/// Characters a timestamp may be built from. No zone or offset.
const DATE_CHARS: &str = "0123456789-:T";

/// `d` marks a digit, anything else must match literally.
const DATE_SHAPE: &[u8] = b"dddd-dd-ddTdd:dd:dd";

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub const SEPARATOR: &str = " - ";
pub const USER_PREFIX: &str = "User ";
pub const EVENT_PREFIX: &str = "Event: ";

/// Parse a `YYYY-MM-DDTHH:MM:SS` timestamp.
///
/// Greedily takes every leading date character, then requires that run to
/// be a real calendar date-time. An empty run is an error.
pub fn date(input: Input<'_>) -> ParseResult<'_, NaiveDateTime> {
    let (text, rest) = take_while(input, |c| DATE_CHARS.contains(c));

    if !has_date_shape(text) {
        return Err(input.error(ParseErrorKind::InvalidDate));
    }

    let timestamp = NaiveDateTime::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| input.error(ParseErrorKind::InvalidDate))?;

    // chrono reads second 60 as a leap second on any minute
    if timestamp.nanosecond() >= 1_000_000_000 {
        return Err(input.error(ParseErrorKind::InvalidDate));
    }

    Ok((timestamp, rest))
}

/// Check the fixed-width layout so the calendar parser never sees
/// unpadded or over-long fields.
fn has_date_shape(text: &str) -> bool {
    text.len() == DATE_SHAPE.len()
        && text.bytes().zip(DATE_SHAPE).all(|(b, &shape)| match shape {
            b'd' => b.is_ascii_digit(),
            lit => b == lit,
        })
}

/// Parse the ` - ` between the timestamp and the user.
pub fn separator(input: Input<'_>) -> ParseResult<'_, ()> {
    let (_, rest) = literal(input, SEPARATOR, ParseErrorKind::ExpectedSeparator)?;
    Ok(((), rest))
}

/// Parse a user id: an optionally signed decimal integer that is not negative.
pub fn user_id(input: Input<'_>) -> ParseResult<'_, u64> {
    let (sign, after_sign) = take_sign(input);
    let (digits, rest) = take_while(after_sign, |c| c.is_ascii_digit());

    if digits.is_empty() {
        return Err(after_sign.expected(ParseErrorKind::ExpectedInteger));
    }

    let value: u64 = digits
        .parse()
        .map_err(|_| input.error(ParseErrorKind::ExpectedInteger))?;

    if sign == Some('-') && value != 0 {
        return Err(input.error(ParseErrorKind::ExpectedInteger));
    }

    Ok((value, rest))
}

fn take_sign(input: Input<'_>) -> (Option<char>, Input<'_>) {
    match input.peek_char() {
        Some(c @ ('+' | '-')) => (Some(c), input.advance(1)),
        _ => (None, input),
    }
}

/// Parse exactly one whitespace character. Newlines end the line, so they
/// do not count.
fn whitespace(input: Input<'_>) -> ParseResult<'_, ()> {
    match input.peek_char() {
        Some(c) if c.is_whitespace() && c != '\n' => Ok(((), input.advance(c.len_utf8()))),
        _ => Err(input.expected(ParseErrorKind::ExpectedWhitespace)),
    }
}

/// Parse `User <id>` and the single whitespace character after it.
pub fn user(input: Input<'_>) -> ParseResult<'_, u64> {
    let (_, rest) = literal(input, USER_PREFIX, ParseErrorKind::ExpectedUserPrefix)?;
    let (id, rest) = user_id(rest)?;
    let (_, rest) = whitespace(rest)?;
    Ok((id, rest))
}

/// Parse one event type token.
///
/// The whole word is read before lookup, so `submit_formX` is rejected
/// rather than matched as `submit_form`.
pub fn event_type(input: Input<'_>) -> ParseResult<'_, EventType> {
    let (word, rest) = take_while(input, |c| c.is_alphanumeric() || c == '_');

    if word.is_empty() {
        return Err(input.expected(ParseErrorKind::UnknownEventType));
    }

    EventType::from_token(word)
        .map(|event_type| (event_type, rest))
        .ok_or_else(|| input.error(ParseErrorKind::UnknownEventType))
}

/// Parse `Event: <type>`.
pub fn event(input: Input<'_>) -> ParseResult<'_, EventType> {
    let (_, rest) = literal(input, EVENT_PREFIX, ParseErrorKind::ExpectedEventPrefix)?;
    event_type(rest)
}

/// Validate a standalone user id value (e.g. a `userId` query parameter).
pub fn validate_user_id(value: &str) -> Result<u64, ParseError> {
    all_consuming(value, user_id)
}

/// Validate a standalone timestamp value (e.g. `fromDate`/`toDate`).
pub fn validate_date(value: &str) -> Result<NaiveDateTime, ParseError> {
    all_consuming(value, date)
}

/// Validate a standalone event type value.
pub fn validate_event_type(value: &str) -> Result<EventType, ParseError> {
    all_consuming(value, event_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn kind<T: std::fmt::Debug>(result: Result<T, ParseError>) -> ParseErrorKind {
        result.unwrap_err().kind
    }

    #[test]
    fn test_date() {
        let (ts, rest) = date(Input::new("2024-03-01T07:48:16 - User")).unwrap();
        assert_eq!(
            ts,
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(7, 48, 16)
                .unwrap()
        );
        assert_eq!(rest.rest(), " - User");
    }

    #[test]
    fn test_date_leap_day() {
        assert!(validate_date("2024-02-29T05:59:59").is_ok());
        assert_eq!(kind(validate_date("2023-02-29T05:59:59")), ParseErrorKind::InvalidDate);
    }

    #[test]
    fn test_date_rejects_out_of_range() {
        assert_eq!(kind(validate_date("2024-13-01T00:00:00")), ParseErrorKind::InvalidDate);
        assert_eq!(kind(validate_date("2024-01-32T00:00:00")), ParseErrorKind::InvalidDate);
        assert_eq!(kind(validate_date("2024-01-01T24:00:00")), ParseErrorKind::InvalidDate);
        assert_eq!(kind(validate_date("2024-01-01T00:60:00")), ParseErrorKind::InvalidDate);
        assert_eq!(kind(validate_date("2024-01-01T00:00:60")), ParseErrorKind::InvalidDate);
        assert_eq!(kind(validate_date("2024-03-01T07:48:60")), ParseErrorKind::InvalidDate);
        assert!(validate_date("2024-03-01T07:48:59").is_ok());
    }

    #[test]
    fn test_date_rejects_loose_shapes() {
        assert_eq!(kind(validate_date("2024-3-1T07:48:16")), ParseErrorKind::InvalidDate);
        assert_eq!(kind(validate_date("2024-03-01")), ParseErrorKind::InvalidDate);
        assert_eq!(kind(validate_date("20240301T074816")), ParseErrorKind::InvalidDate);
        assert_eq!(kind(validate_date("2024-03-01T07:48:16:00")), ParseErrorKind::InvalidDate);
    }

    #[test]
    fn test_date_empty_run_fails() {
        let err = date(Input::new("User 101")).unwrap_err();
        assert_eq!(err, ParseError::new(ParseErrorKind::InvalidDate, 0));
        assert_eq!(kind(validate_date("")), ParseErrorKind::InvalidDate);
    }

    #[test]
    fn test_date_with_offset_is_trailing_input() {
        // '+' and 'Z' are not date characters; the run stops before them
        assert_eq!(
            kind(validate_date("2024-03-01T07:48:16Z")),
            ParseErrorKind::UnexpectedTrailingInput
        );
        assert_eq!(
            kind(validate_date("2024-03-01T07:48:16+01:00")),
            ParseErrorKind::UnexpectedTrailingInput
        );
    }

    #[test]
    fn test_separator() {
        let (_, rest) = separator(Input::new(" - User")).unwrap();
        assert_eq!(rest.rest(), "User");
        assert_eq!(kind(separator(Input::new(" -User"))), ParseErrorKind::ExpectedSeparator);
        assert_eq!(kind(separator(Input::new("- User"))), ParseErrorKind::ExpectedSeparator);
    }

    #[test]
    fn test_user() {
        let (id, rest) = user(Input::new("User 101 Event: logout")).unwrap();
        assert_eq!(id, 101);
        assert_eq!(rest.rest(), "Event: logout");
    }

    #[test]
    fn test_user_errors() {
        assert_eq!(kind(user(Input::new("user 101 "))), ParseErrorKind::ExpectedUserPrefix);
        assert_eq!(kind(user(Input::new("User abc "))), ParseErrorKind::ExpectedInteger);
        assert_eq!(kind(user(Input::new("User 101Event"))), ParseErrorKind::ExpectedWhitespace);
        assert_eq!(kind(user(Input::new("User 101\nEvent"))), ParseErrorKind::ExpectedWhitespace);
        assert_eq!(kind(user(Input::new("User 101"))), ParseErrorKind::UnexpectedEndOfInput);
    }

    #[test]
    fn test_user_accepts_tab() {
        let (id, rest) = user(Input::new("User 7\tEvent")).unwrap();
        assert_eq!(id, 7);
        assert_eq!(rest.rest(), "Event");
    }

    #[test]
    fn test_user_id_signs() {
        assert_eq!(validate_user_id("+42").unwrap(), 42);
        assert_eq!(validate_user_id("-0").unwrap(), 0);
        assert_eq!(kind(validate_user_id("-5")), ParseErrorKind::ExpectedInteger);
        assert_eq!(kind(validate_user_id("+")), ParseErrorKind::UnexpectedEndOfInput);
    }

    #[test]
    fn test_user_id_overflow() {
        assert_eq!(
            kind(validate_user_id("99999999999999999999999")),
            ParseErrorKind::ExpectedInteger
        );
    }

    #[test]
    fn test_validate_user_id_rejects_trailing() {
        assert_eq!(validate_user_id("101").unwrap(), 101);
        assert_eq!(kind(validate_user_id("101abc")), ParseErrorKind::UnexpectedTrailingInput);
        assert_eq!(kind(validate_user_id("")), ParseErrorKind::UnexpectedEndOfInput);
    }

    #[test]
    fn test_event() {
        let (t, rest) = event(Input::new("Event: submit_form")).unwrap();
        assert_eq!(t, EventType::SubmitForm);
        assert!(rest.is_empty());

        assert_eq!(
            kind(event(Input::new("Event:submit_form"))),
            ParseErrorKind::ExpectedEventPrefix
        );
        assert_eq!(kind(event(Input::new("Event: submit"))), ParseErrorKind::UnknownEventType);
        assert_eq!(kind(event(Input::new("Event: "))), ParseErrorKind::UnexpectedEndOfInput);
    }

    #[test]
    fn test_event_type_is_exact() {
        let err = event(Input::new("Event: submit_formX")).unwrap_err();
        assert_eq!(err, ParseError::new(ParseErrorKind::UnknownEventType, 7));
        assert_eq!(kind(validate_event_type("logout2")), ParseErrorKind::UnknownEventType);
    }

    #[test]
    fn test_validate_event_type() {
        for t in EventType::ALL {
            assert_eq!(validate_event_type(t.as_str()).unwrap(), t);
        }
        assert_eq!(
            kind(validate_event_type("logout ")),
            ParseErrorKind::UnexpectedTrailingInput
        );
    }
}
