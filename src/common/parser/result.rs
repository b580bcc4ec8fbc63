use nom_locate::LocatedSpan;

use crate::error::{Error, ErrorKind};

pub type Span<'a> = LocatedSpan<&'a str>;

pub type IResult<'a, O> = nom::IResult<Span<'a>, O, ParseError<'a>>;

#[derive(Debug, PartialEq)]
pub struct ParseError<'a> {
    message: String,
    wherein: Span<'a>,
    kind: ErrorKind,
}

impl<'a> ParseError<'a> {
    pub fn new(message: String, wherein: Span<'a>) -> Self {
        Self {
            message,
            wherein,
            kind: ErrorKind::Parse,
        }
    }

    /// Reports a well-formed input rejected for another reason, e.g. a
    /// matcher regex that does not compile.
    pub fn kind_of(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn partial(wherein: &str, expected: &str, span: Span<'a>) -> Self {
        Self::new(
            format!(
                "unexpected {} in {}, expected {}",
                unexpected(&span),
                wherein,
                expected
            ),
            span,
        )
    }

    pub fn message(&self) -> &String {
        &self.message
    }

    pub fn line(&self) -> u32 {
        self.wherein.location_line()
    }

    pub fn offset(&self) -> usize {
        self.wherein.location_offset()
    }

    pub fn column(&self) -> usize {
        self.wherein.get_utf8_column()
    }
}

fn unexpected(span: &Span) -> String {
    match span.fragment().chars().next() {
        None => String::from("end of line"),
        Some(c) => format!("'{}'", c),
    }
}

impl<'a> nom::error::ParseError<Span<'a>> for ParseError<'a> {
    fn from_error_kind(input: Span<'a>, kind: nom::error::ErrorKind) -> Self {
        Self::new(format!("parse error {:?}", kind), input)
    }

    fn append(_input: Span<'a>, _kind: nom::error::ErrorKind, other: Self) -> Self {
        other
    }

    fn from_char(input: Span<'a>, c: char) -> Self {
        Self::new(format!("expected character '{}'", c), input)
    }
}

impl<'a> From<ParseError<'a>> for Error {
    fn from(err: ParseError) -> Self {
        Error::with_kind(
            err.kind,
            &format!("column {}: {}", err.column(), err.message()),
        )
    }
}

/// Runs `parser` over the whole of `input`, turning nom's error wrapper into
/// the crate error.
pub fn parse_all<'a, O, F>(mut parser: F, input: &'a str) -> Result<O, Error>
where
    F: FnMut(Span<'a>) -> IResult<'a, O>,
{
    match parser(Span::new(input)) {
        Ok((_, o)) => Ok(o),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(e.into()),
        Err(nom::Err::Incomplete(_)) => Err(Error::parse("incomplete input")),
    }
}
