use memchr::memchr;
use nom::{
    error::{ErrorKind, ParseError},
    AsBytes, Compare, CompareResult, Err, IResult, InputIter, InputLength, InputTake,
    InputTakeAtPosition, Needed, Offset, Slice,
};
use std::{
    ops::{Range, RangeFrom, RangeTo},
    str::{CharIndices, Chars},
};

/// A window over the input buffer.
///
/// The parser threads one of these through every routine: `buffer` is the
/// whole document, `start` is the zero-based offset of the next byte to read
/// and `end` bounds the window (the buffer length for every cursor the parser
/// hands around, narrower only for slices produced by nom combinators).
#[derive(Clone, Debug, Copy, PartialEq)]
pub struct Cursor<'a> {
    buffer: &'a str,
    start: usize,
    end: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buffer: &'a str) -> Self {
        Self {
            buffer,
            start: 0,
            end: buffer.len(),
        }
    }

    pub fn buffer(&self) -> &'a str {
        self.buffer
    }

    /// Offset of the cursor from the beginning of the buffer.
    pub fn index(&self) -> usize {
        self.start
    }

    /// Index of the final byte of the buffer.
    pub fn last_index(&self) -> usize {
        self.buffer.len().saturating_sub(1)
    }

    pub fn fragment(&self) -> &'a str {
        &self.buffer[self.start..self.end]
    }

    pub fn peek(&self) -> Option<u8> {
        self.fragment().as_bytes().first().copied()
    }

    pub fn peek_char(&self) -> Option<char> {
        self.fragment().chars().next()
    }

    pub fn starts_with(&self, char: char) -> bool {
        self.fragment().starts_with(char)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Distance in bytes to the next occurrence of `byte`.
    pub fn find(&self, byte: u8) -> Option<usize> {
        memchr(byte, self.fragment().as_bytes())
    }

    fn narrow(&self, next: &'a str) -> Self {
        let start = self.start + self.fragment().offset(next);

        Self {
            buffer: self.buffer,
            start,
            end: start + next.len(),
        }
    }
}

impl<'a> AsBytes for Cursor<'a> {
    fn as_bytes(&self) -> &[u8] {
        self.fragment().as_bytes()
    }
}

impl<'a, 'b> Compare<&'b str> for Cursor<'a> {
    fn compare(&self, t: &'b str) -> CompareResult {
        self.fragment().compare(t)
    }

    fn compare_no_case(&self, t: &'b str) -> CompareResult {
        self.fragment().compare_no_case(t)
    }
}

impl<'a> InputIter for Cursor<'a> {
    type Item = char;

    type Iter = CharIndices<'a>;

    type IterElem = Chars<'a>;

    fn iter_indices(&self) -> Self::Iter {
        self.fragment().char_indices()
    }

    fn iter_elements(&self) -> Self::IterElem {
        self.fragment().chars()
    }

    fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: Fn(Self::Item) -> bool,
    {
        self.fragment().position(predicate)
    }

    fn slice_index(&self, count: usize) -> Result<usize, Needed> {
        self.fragment().slice_index(count)
    }
}

impl<'a> InputLength for Cursor<'a> {
    fn input_len(&self) -> usize {
        self.end - self.start
    }
}

impl<'a> InputTake for Cursor<'a> {
    fn take(&self, count: usize) -> Self {
        self.slice(..count)
    }

    fn take_split(&self, count: usize) -> (Self, Self) {
        (self.slice(count..), self.slice(..count))
    }
}

impl<'a> Cursor<'a> {
    /// Splits at the first char matching `predicate`. A `complete` split
    /// takes the whole window when nothing matches, and `empty` rejects an
    /// empty prefix with the given kind.
    fn split_where<P, E>(
        &self,
        predicate: P,
        empty: Option<ErrorKind>,
        complete: bool,
    ) -> IResult<Self, Self, E>
    where
        P: Fn(char) -> bool,
        E: ParseError<Self>,
    {
        let at = match self.fragment().find(|c: char| predicate(c)) {
            Some(at) => at,
            None if complete => self.input_len(),
            None => return Err(Err::Incomplete(Needed::new(1))),
        };

        match empty {
            Some(kind) if at == 0 => Err(Err::Error(E::from_error_kind(*self, kind))),
            _ => Ok(self.take_split(at)),
        }
    }
}

impl<'a> InputTakeAtPosition for Cursor<'a> {
    type Item = char;

    fn split_at_position<P, E: ParseError<Self>>(&self, predicate: P) -> IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        self.split_where(predicate, None, false)
    }

    fn split_at_position1<P, E: ParseError<Self>>(
        &self,
        predicate: P,
        e: ErrorKind,
    ) -> IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        self.split_where(predicate, Some(e), false)
    }

    fn split_at_position_complete<P, E: ParseError<Self>>(
        &self,
        predicate: P,
    ) -> IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        self.split_where(predicate, None, true)
    }

    fn split_at_position1_complete<P, E: ParseError<Self>>(
        &self,
        predicate: P,
        e: ErrorKind,
    ) -> IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        self.split_where(predicate, Some(e), true)
    }
}

impl<'a> Offset for Cursor<'a> {
    fn offset(&self, second: &Self) -> usize {
        second.start - self.start
    }
}

impl<'a> Slice<Range<usize>> for Cursor<'a> {
    fn slice(&self, range: Range<usize>) -> Self {
        self.narrow(self.fragment().slice(range))
    }
}

impl<'a> Slice<RangeTo<usize>> for Cursor<'a> {
    fn slice(&self, range: RangeTo<usize>) -> Self {
        self.narrow(self.fragment().slice(range))
    }
}

impl<'a> Slice<RangeFrom<usize>> for Cursor<'a> {
    fn slice(&self, range: RangeFrom<usize>) -> Self {
        self.narrow(self.fragment().slice(range))
    }
}
