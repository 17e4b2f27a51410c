use crate::{input::Cursor, parser::Token};
use memchr::memrchr;
use nom::error::{ErrorKind, FromExternalError, ParseError};
use std::fmt::{self, Display};
use thiserror::Error;

#[derive(Debug, PartialEq, Clone, Error)]
pub enum Kind {
    #[error("empty input")]
    EmptyInput,
    #[error("input is not valid utf-8")]
    InvalidUtf8,
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("expected {expected:?}, found {found:?}")]
    UnexpectedToken {
        expected: Token,
        found: Option<char>,
    },
    #[error("missing closing quote")]
    MissingQuote,
    #[error("missing colon after object key")]
    MissingColon,
    #[error("invalid object key '{0}'")]
    InvalidKey(String),
    #[error("expected '{expected}', found '{found}'")]
    MismatchedDelimiter { expected: char, found: char },
    #[error("invalid value '{0}'")]
    InvalidValue(String),
    #[error("invalid number {0}")]
    InvalidNumber(String),
    #[error("nesting deeper than {0} levels")]
    DepthLimitExceeded(usize),
    #[error("{0}")]
    Custom(String),
    #[error("parser error: {0:?}")]
    Nom(ErrorKind),
}

impl Kind {
    /// Whether this kind is a structural violation of the JSON syntax, as
    /// opposed to a failure coming from outside the document.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, Self::EmptyInput | Self::InvalidUtf8 | Self::Custom(_))
    }
}

/// Location of an error inside the parsed buffer.
///
/// `line` and `col` start at 1, `col` counts characters rather than bytes.
/// Errors raised outside of a parse (by the writer) carry the default
/// position, where every field is 0.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn locate(buffer: &[u8], offset: usize) -> Self {
        let before = &buffer[..offset.min(buffer.len())];

        let line_start = memrchr(b'\n', before).map(|i| i + 1).unwrap_or(0);

        Self {
            offset,
            line: bytecount::count(before, b'\n') + 1,
            col: bytecount::num_chars(&before[line_start..]) + 1,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.col)
    }
}

impl<'a> From<Cursor<'a>> for Position {
    fn from(cursor: Cursor<'a>) -> Self {
        Self::locate(cursor.buffer().as_bytes(), cursor.index())
    }
}

#[derive(Debug, PartialEq, Clone, Error)]
#[error("{kind} at {position}")]
pub struct Error {
    pub position: Position,
    pub kind: Kind,
}

impl Error {
    pub fn new(position: Position, kind: Kind) -> Self {
        Self { position, kind }
    }

    pub fn is_malformed(&self) -> bool {
        self.kind.is_malformed()
    }
}

impl From<fmt::Error> for Error {
    fn from(value: fmt::Error) -> Self {
        Self::new(Position::default(), Kind::Custom(value.to_string()))
    }
}

impl serde::ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Self::new(Position::default(), Kind::Custom(msg.to_string()))
    }
}

impl<'a> ParseError<Cursor<'a>> for Error {
    fn from_error_kind(input: Cursor<'a>, kind: ErrorKind) -> Self {
        Self::new(Position::from(input), Kind::Nom(kind))
    }

    fn append(_input: Cursor<'a>, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<'a, T> FromExternalError<Cursor<'a>, T> for Error {
    fn from_external_error(input: Cursor<'a>, kind: ErrorKind, _e: T) -> Self {
        Self::new(Position::from(input), Kind::Nom(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_counts_lines_and_chars() {
        let buffer = "{\n  \"é\": tru\n}";

        let position = Position::locate(buffer.as_bytes(), buffer.find("tru").unwrap());

        assert_eq!(position.line, 2);
        assert_eq!(position.col, 8);
    }

    #[test]
    fn locate_first_byte() {
        let position = Position::locate(b"[1]", 0);

        assert_eq!(position, Position { offset: 0, line: 1, col: 1 });
    }

    #[test]
    fn display_mentions_the_location() {
        let error = Error::new(Position::locate(b"{\"a\" 1}", 5), Kind::MissingColon);

        assert_eq!(
            error.to_string(),
            "missing colon after object key at line 1, column 6"
        );
    }
}
