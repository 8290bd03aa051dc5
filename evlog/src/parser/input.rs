//! Cursor, result and error types shared by every grammar rule.
//!
//! Rules are plain functions `fn(Input<'a>) -> ParseResult<'a, T>`. The
//! cursor is `Copy` and never mutated in place: a rule hands back a new
//! cursor for the unconsumed remainder, so holding on to an older cursor
//! is all it takes to look ahead or backtrack.

/// The kinds of failure a grammar rule can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("expected separator ' - '")]
    ExpectedSeparator,

    #[error("expected 'User ' prefix")]
    ExpectedUserPrefix,

    #[error("expected a non-negative integer")]
    ExpectedInteger,

    #[error("expected a whitespace character")]
    ExpectedWhitespace,

    #[error("expected 'Event: ' prefix")]
    ExpectedEventPrefix,

    #[error("unknown event type")]
    UnknownEventType,

    #[error("invalid date, expected YYYY-MM-DDTHH:MM:SS")]
    InvalidDate,

    #[error("unexpected trailing input")]
    UnexpectedTrailingInput,

    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}

/// A failed parse: what went wrong and the byte offset where it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at byte {position}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: usize) -> Self {
        Self { kind, position }
    }

    /// 1-based (line, column) of this error within `source`.
    ///
    /// Columns count characters, not bytes.
    pub fn locate(&self, source: &str) -> (usize, usize) {
        let mut end = self.position.min(source.len());
        while !source.is_char_boundary(end) {
            end -= 1;
        }
        let before = &source[..end];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }
}

/// Outcome of a grammar rule: the value plus the remaining input, or an error.
pub type ParseResult<'a, T> = Result<(T, Input<'a>), ParseError>;

/// A read-only position within the text being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Input<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Input<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Byte offset into the original text.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Unconsumed text.
    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.src.len()
    }

    pub fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Text up to (not including) the next newline or the end of input.
    /// Does not move the cursor.
    pub fn peek_line(&self) -> &'a str {
        let rest = self.rest();
        match rest.find('\n') {
            Some(end) => &rest[..end],
            None => rest,
        }
    }

    /// Move forward by `len` bytes. `len` must land on a char boundary.
    pub fn advance(self, len: usize) -> Self {
        debug_assert!(self.src.is_char_boundary(self.pos + len));
        Self {
            src: self.src,
            pos: self.pos + len,
        }
    }

    /// Text consumed between this cursor and a later one over the same source.
    pub fn consumed_until(&self, later: &Input<'a>) -> &'a str {
        &self.src[self.pos..later.pos]
    }

    /// An error of `kind` at this position.
    pub fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.pos)
    }

    /// Like [`Input::error`], but reports running out of input when nothing is left.
    pub fn expected(&self, kind: ParseErrorKind) -> ParseError {
        if self.is_empty() {
            self.error(ParseErrorKind::UnexpectedEndOfInput)
        } else {
            self.error(kind)
        }
    }
}

/// Match an exact literal.
pub fn literal<'a>(
    input: Input<'a>,
    lit: &'static str,
    kind: ParseErrorKind,
) -> ParseResult<'a, &'a str> {
    if input.rest().starts_with(lit) {
        Ok((lit, input.advance(lit.len())))
    } else {
        Err(input.expected(kind))
    }
}

/// Consume the longest run of characters satisfying `pred`. Never fails.
pub fn take_while<'a>(input: Input<'a>, pred: impl Fn(char) -> bool) -> (&'a str, Input<'a>) {
    let rest = input.rest();
    let len = rest
        .char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(rest.len(), |(i, _)| i);
    (&rest[..len], input.advance(len))
}

/// Match a single `\n`.
pub fn newline(input: Input<'_>) -> ParseResult<'_, ()> {
    match input.peek_char() {
        Some('\n') => Ok(((), input.advance(1))),
        Some(_) => Err(input.error(ParseErrorKind::UnexpectedTrailingInput)),
        None => Err(input.error(ParseErrorKind::UnexpectedEndOfInput)),
    }
}

/// Succeed only at the end of input.
pub fn eof(input: Input<'_>) -> ParseResult<'_, ()> {
    if input.is_empty() {
        Ok(((), input))
    } else {
        Err(input.error(ParseErrorKind::UnexpectedTrailingInput))
    }
}

/// Run `rule` over the whole of `text`, rejecting anything it leaves behind.
pub fn all_consuming<'a, T>(
    text: &'a str,
    rule: impl FnOnce(Input<'a>) -> ParseResult<'a, T>,
) -> Result<T, ParseError> {
    let (value, rest) = rule(Input::new(text))?;
    eof(rest)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_line_does_not_advance() {
        let input = Input::new("first line\nsecond");
        assert_eq!(input.peek_line(), "first line");
        assert_eq!(input.position(), 0);
        assert_eq!(input.rest(), "first line\nsecond");
    }

    #[test]
    fn test_peek_line_without_newline() {
        let input = Input::new("only line");
        assert_eq!(input.peek_line(), "only line");
        assert_eq!(Input::new("").peek_line(), "");
    }

    #[test]
    fn test_literal() {
        let (lit, rest) =
            literal(Input::new(" - User"), " - ", ParseErrorKind::ExpectedSeparator).unwrap();
        assert_eq!(lit, " - ");
        assert_eq!(rest.rest(), "User");

        let err =
            literal(Input::new("-User"), " - ", ParseErrorKind::ExpectedSeparator).unwrap_err();
        assert_eq!(err, ParseError::new(ParseErrorKind::ExpectedSeparator, 0));

        let err = literal(Input::new(""), " - ", ParseErrorKind::ExpectedSeparator).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEndOfInput);
    }

    #[test]
    fn test_take_while_stops_at_first_mismatch() {
        let (digits, rest) = take_while(Input::new("123abc"), |c| c.is_ascii_digit());
        assert_eq!(digits, "123");
        assert_eq!(rest.position(), 3);

        let (none, rest) = take_while(Input::new("abc"), |c| c.is_ascii_digit());
        assert_eq!(none, "");
        assert_eq!(rest.position(), 0);
    }

    #[test]
    fn test_consumed_until() {
        let start = Input::new("abc\ndef");
        let later = start.advance(3);
        assert_eq!(start.consumed_until(&later), "abc");
    }

    #[test]
    fn test_newline_and_eof() {
        assert!(newline(Input::new("\nx")).is_ok());
        assert_eq!(
            newline(Input::new("x")).unwrap_err().kind,
            ParseErrorKind::UnexpectedTrailingInput
        );
        assert_eq!(
            newline(Input::new("")).unwrap_err().kind,
            ParseErrorKind::UnexpectedEndOfInput
        );
        assert!(eof(Input::new("")).is_ok());
        assert!(eof(Input::new(" ")).is_err());
    }

    #[test]
    fn test_locate() {
        let source = "abc\ndéf\nghi";
        assert_eq!(ParseError::new(ParseErrorKind::InvalidDate, 0).locate(source), (1, 1));
        assert_eq!(ParseError::new(ParseErrorKind::InvalidDate, 4).locate(source), (2, 1));
        // 'é' is two bytes; byte 7 is the 'f'
        assert_eq!(ParseError::new(ParseErrorKind::InvalidDate, 7).locate(source), (2, 3));
        assert_eq!(ParseError::new(ParseErrorKind::InvalidDate, 99).locate(source), (3, 4));
    }
}
