use crate::error::{Error, Kind, Position};
use crate::input::Cursor;
use crate::options::{Keywords, ParseOptions};
use crate::value::{Map, Value};
use nom::{
    bytes::complete::{tag, take_till, take_while},
    character::complete::{anychar, char, digit0, one_of},
    combinator::{map, opt, recognize},
    sequence::{pair, preceded, tuple},
    Err, IResult, InputLength, InputTake, Offset, Slice,
};

pub type Span<'a> = Cursor<'a>;

pub type Result<'a, R> = IResult<Span<'a>, R, Error>;
pub type ParseResult = std::result::Result<Value, Error>;

/// Returned in place of a value when the document does not start with a
/// recognisable token.
pub const INVALID_JSON: &str = "Invalid JSON String";

/// Kind of the next token, decided from its first byte only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    String,
    Number,
    True,
    False,
    Null,
    ObjectStart,
    ObjectEnd,
    ArrayStart,
    ArrayEnd,
    Invalid,
}

impl Token {
    pub fn of(byte: u8) -> Self {
        match byte {
            b'{' => Self::ObjectStart,
            b'}' => Self::ObjectEnd,
            b'[' => Self::ArrayStart,
            b']' => Self::ArrayEnd,
            b'"' => Self::String,
            b'n' => Self::Null,
            b'f' => Self::False,
            b't' => Self::True,
            b'0'..=b'9' | b'-' | b'+' => Self::Number,
            _ => Self::Invalid,
        }
    }
}

fn failure<T>(i: Span, kind: Kind) -> Result<T> {
    Err(Err::Failure(Error::new(Position::from(i), kind)))
}

fn is_sp(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_delimiter(c: char) -> bool {
    let chars = " ,]}\n";

    chars.contains(c)
}

fn is_key_delimiter(c: char) -> bool {
    is_delimiter(c) || c == ':'
}

fn sp(i: Span) -> Result<()> {
    let (rest, skipped) = take_while(is_sp)(i)?;

    // The last byte of the buffer is never skipped, even when it is whitespace
    if skipped.input_len() > 0 && rest.index() > i.last_index() {
        return Ok((i.slice(skipped.input_len() - 1..), ()));
    }

    Ok((rest, ()))
}

fn until_delimiter(i: Span) -> Result<Span> {
    take_till(is_delimiter)(i)
}

fn next_token(i: Span) -> Result<Token> {
    match i.peek() {
        Some(byte) => Ok((i, Token::of(byte))),
        None => failure(i, Kind::UnexpectedEnd),
    }
}

fn opening(c: char, expected: Token) -> impl Fn(Span) -> Result<char> {
    move |i: Span| {
        char(c)(i).or_else(|_: Err<Error>| {
            failure(
                i,
                Kind::UnexpectedToken {
                    expected,
                    found: i.peek_char(),
                },
            )
        })
    }
}

fn colon(i: Span) -> Result<char> {
    char(':')(i).or_else(|_: Err<Error>| failure(i, Kind::MissingColon))
}

/// Whether `c` ends a run of unclassifiable bytes: whitespace, a separator or
/// the first byte of another token.
fn ends_invalid_run(c: char) -> bool {
    is_sp(c) || c == ',' || c == ':' || (c.is_ascii() && Token::of(c as u8) != Token::Invalid)
}

/// Consumes a token that could not be classified, leaving any value that
/// follows it in place.
fn skip_invalid(i: Span) -> Result<Span> {
    let (rest, skipped) = recognize(pair(anychar, take_till(ends_invalid_run)))(i)?;

    log::debug!(
        "skipping invalid token {:?} at offset {}",
        skipped.fragment(),
        i.index()
    );

    Ok((rest, skipped))
}

fn string(i: Span) -> Result<String> {
    let (i, _) = opening('"', Token::String)(i)?;

    let Some(len) = i.find(b'"') else {
        return failure(i, Kind::MissingQuote);
    };

    let (i, content) = i.take_split(len);
    let (i, _) = char('"')(i)?;

    Ok((i, content.fragment().to_owned()))
}

fn number(i: Span) -> Result<Value> {
    let start = i;

    if !matches!(i.peek(), Some(b'0'..=b'9' | b'-' | b'+')) {
        return failure(
            i,
            Kind::UnexpectedToken {
                expected: Token::Number,
                found: i.peek_char(),
            },
        );
    }

    let (i, sign) = opt(one_of("+-"))(i)?;
    let (i, integer) = digit0(i)?;
    let (i, fraction) = opt(preceded(char('.'), digit0))(i)?;
    let after_fraction = i;
    let (i, exponent) = opt(tuple((one_of("eE"), opt(one_of("+-")), digit0)))(i)?;

    let span = start.offset(&i);
    let literal = start.slice(..span).fragment();

    let invalid = |reason: &dyn std::fmt::Display| {
        failure(
            start,
            Kind::InvalidNumber(format!("'{}' ({})", literal, reason)),
        )
    };

    if let Some(digits) = fraction {
        // An exponent marker without digits is not handed to the conversion
        let text = match exponent {
            Some((_, _, exp)) if exp.input_len() > 0 => literal,
            _ => start.slice(..start.offset(&after_fraction)).fragment(),
        };

        let value = if digits.input_len() > 7 {
            text.parse().map(Value::Double)
        } else {
            text.parse().map(Value::Float)
        };

        return match value {
            Ok(value) => Ok((i, value)),
            Err(e) => invalid(&e),
        };
    }

    if integer.input_len() == 0 {
        return invalid(&"no digits");
    }

    // Integers stop converting at the first non digit, so an exponent only
    // counts toward the span length. Out of range magnitudes saturate on
    // 64 bits and narrower widths keep the low bits.
    let magnitude = integer.fragment().parse::<u64>().unwrap_or_else(|_| {
        log::debug!("saturating integer literal '{}'", literal);
        u64::MAX
    });
    let wide = span >= 11;

    let value = if sign == Some('-') {
        let signed = i64::try_from(magnitude).map_or(i64::MIN, |n| -n);

        if wide {
            Value::Int64(signed)
        } else {
            Value::Int32(signed as i32)
        }
    } else if wide {
        Value::UInt64(magnitude)
    } else {
        Value::UInt32(magnitude as u32)
    };

    Ok((i, value))
}

/// Recursive descent parser over a [`Cursor`].
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    fn keyword<'a>(&self, i: Span<'a>, literal: &'static str, token: Token) -> Result<'a, ()> {
        if i.peek() != literal.bytes().next() {
            return failure(
                i,
                Kind::UnexpectedToken {
                    expected: token,
                    found: i.peek_char(),
                },
            );
        }

        match self.options.keywords {
            Keywords::Exact => match tag::<_, _, Error>(literal)(i) {
                Ok((i, _)) => Ok((i, ())),
                Err(_) => {
                    let (_, found) = until_delimiter(i)?;

                    failure(i, Kind::InvalidValue(found.fragment().to_owned()))
                }
            },
            Keywords::Permissive => {
                let (i, _) = take_while(|c: char| literal.contains(c))(i)?;

                Ok((i, ()))
            }
        }
    }

    fn enter<'a>(&self, i: Span<'a>, depth: usize) -> Result<'a, ()> {
        if depth > self.options.max_depth {
            return failure(i, Kind::DepthLimitExceeded(self.options.max_depth));
        }

        Ok((i, ()))
    }

    fn array<'a>(&self, i: Span<'a>, depth: usize) -> Result<'a, Vec<Value>> {
        let (mut i, _) = opening('[', Token::ArrayStart)(i)?;
        (i, _) = self.enter(i, depth)?;

        log::trace!("array at offset {}", i.index());

        let mut values = Vec::new();

        loop {
            match i.peek() {
                Some(b']') => break,
                Some(_) => {}
                None => return failure(i, Kind::UnexpectedEnd),
            }

            (i, _) = sp(i)?;
            let (_, token) = next_token(i)?;

            match token {
                Token::ArrayEnd => {}
                Token::ObjectEnd => {
                    return failure(
                        i,
                        Kind::MismatchedDelimiter {
                            expected: ']',
                            found: '}',
                        },
                    )
                }
                Token::Invalid => (i, _) = skip_invalid(i)?,
                token => {
                    let (rest, value) = self.value(token, i, depth)?;
                    values.push(value);
                    i = rest;
                }
            }

            (i, _) = sp(i)?;

            if i.starts_with(',') {
                i = i.slice(1..);
            }
        }

        let (i, _) = char(']')(i)?;

        log::trace!("array closed at offset {} with {} values", i.index(), values.len());

        Ok((i, values))
    }

    fn object<'a>(&self, i: Span<'a>, depth: usize) -> Result<'a, Map> {
        let (mut i, _) = opening('{', Token::ObjectStart)(i)?;
        (i, _) = self.enter(i, depth)?;

        log::trace!("object at offset {}", i.index());

        let mut map = Map::new();

        loop {
            match i.peek() {
                Some(b'}') => break,
                Some(_) => {}
                None => return failure(i, Kind::UnexpectedEnd),
            }

            (i, _) = sp(i)?;
            let (_, token) = next_token(i)?;

            let key = match token {
                Token::String => {
                    let (rest, key) = string(i)?;
                    i = rest;
                    Value::String(key)
                }
                Token::ObjectEnd => continue,
                Token::ArrayEnd => {
                    return failure(
                        i,
                        Kind::MismatchedDelimiter {
                            expected: '}',
                            found: ']',
                        },
                    )
                }
                _ if i.fragment().chars().all(is_sp) => {
                    return failure(i, Kind::UnexpectedEnd);
                }
                _ => {
                    let (_, found) = take_till(is_key_delimiter)(i)?;

                    return failure(i, Kind::InvalidKey(found.fragment().to_owned()));
                }
            };

            (i, _) = sp(i)?;
            (i, _) = colon(i)?;
            (i, _) = sp(i)?;
            let (_, token) = next_token(i)?;

            match token {
                Token::ArrayEnd => {
                    return failure(
                        i,
                        Kind::MismatchedDelimiter {
                            expected: '}',
                            found: ']',
                        },
                    )
                }
                Token::ObjectEnd => {
                    log::debug!("dropping key {} with no value", key);
                }
                Token::Invalid => {
                    log::debug!("dropping key {} with an invalid value", key);
                    (i, _) = skip_invalid(i)?;
                }
                token => {
                    let (rest, value) = self.value(token, i, depth)?;
                    map.insert(key, value);
                    i = rest;
                }
            }

            (i, _) = sp(i)?;

            if i.starts_with(',') {
                i = i.slice(1..);
            }
        }

        let (i, _) = char('}')(i)?;

        log::trace!("object closed at offset {} with {} entries", i.index(), map.len());

        Ok((i, map))
    }

    fn value<'a>(&self, token: Token, i: Span<'a>, depth: usize) -> Result<'a, Value> {
        match token {
            Token::String => map(string, Value::String)(i),
            Token::Number => number(i),
            Token::True => self
                .keyword(i, "true", token)
                .map(|(i, _)| (i, Value::Bool(true))),
            Token::False => self
                .keyword(i, "false", token)
                .map(|(i, _)| (i, Value::Bool(false))),
            Token::Null => self.keyword(i, "null", token).map(|(i, _)| (i, Value::Null)),
            Token::ArrayStart => self
                .array(i, depth + 1)
                .map(|(i, array)| (i, Value::Array(array))),
            Token::ObjectStart => self
                .object(i, depth + 1)
                .map(|(i, obj)| (i, Value::Object(obj))),
            Token::ObjectEnd | Token::ArrayEnd | Token::Invalid => {
                let (_, found) = until_delimiter(i)?;

                failure(i, Kind::InvalidValue(found.fragment().to_owned()))
            }
        }
    }

    pub fn parse(&self, s: &str) -> ParseResult {
        if s.is_empty() {
            return Err(Error::new(Position::default(), Kind::EmptyInput));
        }

        let (i, _) = unwrap_nom_error(sp(Span::new(s)))?;
        let token = i.peek().map(Token::of).unwrap_or(Token::Invalid);

        if matches!(token, Token::Invalid | Token::ArrayEnd | Token::ObjectEnd) {
            log::debug!("no value starts at offset {}", i.index());

            return Ok(Value::String(INVALID_JSON.to_owned()));
        }

        let (rest, value) = unwrap_nom_error(self.value(token, i, 0))?;

        if !rest.is_empty() {
            log::trace!("{} bytes left after the root value", rest.input_len());
        }

        Ok(value)
    }
}

pub fn unwrap_nom_error<T>(value: Result<T>) -> std::result::Result<(Span, T), Error> {
    match value {
        Ok(v) => Ok(v),
        Err(nom::Err::Error(e)) => Err(e),
        Err(nom::Err::Failure(e)) => Err(e),
        Err(nom::Err::Incomplete(_)) => Err(Error::new(Position::default(), Kind::UnexpectedEnd)),
    }
}

pub fn parse(s: &str) -> ParseResult {
    Parser::default().parse(s)
}

pub fn parse_bytes(bytes: &[u8]) -> ParseResult {
    let s = std::str::from_utf8(bytes).map_err(|e| {
        Error::new(
            Position::locate(&bytes[..e.valid_up_to()], e.valid_up_to()),
            Kind::InvalidUtf8,
        )
    })?;

    parse(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_on_first_byte() {
        assert_eq!(Token::of(b'{'), Token::ObjectStart);
        assert_eq!(Token::of(b']'), Token::ArrayEnd);
        assert_eq!(Token::of(b'+'), Token::Number);
        assert_eq!(Token::of(b'0'), Token::Number);
        assert_eq!(Token::of(b't'), Token::True);
        assert_eq!(Token::of(b'x'), Token::Invalid);
        assert_eq!(Token::of(b' '), Token::Invalid);
    }

    #[test]
    fn sp_stops_on_first_non_space() {
        let (i, _) = sp(Span::new(" \t\r\n1 ")).unwrap();

        assert_eq!(i.index(), 4);
    }

    #[test]
    fn sp_never_skips_the_last_byte() {
        let (i, _) = sp(Span::new("[1]  ").slice(3..)).unwrap();

        assert_eq!(i.index(), 4);
        assert_eq!(i.fragment(), " ");
    }

    #[test]
    fn string_stops_at_the_first_quote() {
        let (i, value) = string(Span::new(r#""a\"b""#)).unwrap();

        assert_eq!(value, "a\\");
        assert_eq!(i.fragment(), "b\"");
    }

    #[test]
    fn number_leaves_cursor_after_literal() {
        let (i, value) = number(Span::new("-12.5e3,")).unwrap();

        assert_eq!(value, Value::Float(-12500.0));
        assert_eq!(i.fragment(), ",");
    }

    #[test]
    fn integer_ignores_exponent_digits() {
        let (i, value) = number(Span::new("1e5]")).unwrap();

        assert_eq!(value, Value::UInt32(1));
        assert_eq!(i.fragment(), "]");
    }

    #[test]
    fn skip_invalid_stops_at_the_next_token() {
        for (text, rest) in [("x\t2]", "\t2]"), ("@[1]", "[1]"), ("%%:1", ":1"), ("@", "")] {
            let (i, _) = skip_invalid(Span::new(text)).unwrap();

            assert_eq!(i.fragment(), rest, "{}", text);
        }
    }

    #[test]
    fn keywords_consume_exactly_the_literal() {
        let parser = Parser::default();

        for (text, token) in [("true,", Token::True), ("null]", Token::Null)] {
            let (i, _) = parser.value(token, Span::new(text), 0).unwrap();

            assert_eq!(i.index(), 4);
        }

        let (i, value) = parser.value(Token::False, Span::new("false}"), 0).unwrap();

        assert_eq!(value, Value::Bool(false));
        assert_eq!(i.index(), 5);
    }

    #[test]
    fn permissive_keywords_take_any_run_of_letters() {
        let parser = Parser::new(ParseOptions::new().permissive_keywords());

        let (i, value) = parser.value(Token::True, Span::new("treu, 1"), 0).unwrap();

        assert_eq!(value, Value::Bool(true));
        assert_eq!(i.fragment(), ", 1");
    }

    #[test]
    fn keyword_on_wrong_token() {
        let error = match Parser::default().keyword(Span::new("x"), "true", Token::True) {
            Err(Err::Failure(e)) => e,
            _ => panic!("expected failure"),
        };

        assert_eq!(
            error.kind,
            Kind::UnexpectedToken {
                expected: Token::True,
                found: Some('x')
            }
        );
    }
}
