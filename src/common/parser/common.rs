use nom::{
    bytes::complete::take_while,
    character::complete::{char as nom_char, multispace0, satisfy},
    combinator::recognize,
    sequence::{pair, preceded},
};

use super::result::{IResult, ParseError, Span};

fn is_label_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`
pub fn label_identifier(input: Span) -> IResult<String> {
    let (rest, m) = recognize(pair(satisfy(is_label_start), take_while(is_label_char)))(input)?;
    Ok((rest, m.fragment().to_string()))
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`, colons are reserved for recording rules.
pub fn metric_identifier(input: Span) -> IResult<String> {
    let (rest, m) = recognize(pair(
        satisfy(|c: char| is_label_start(c) || c == ':'),
        take_while(|c: char| is_label_char(c) || c == ':'),
    ))(input)?;
    Ok((rest, m.fragment().to_string()))
}

fn punct<'a>(c: char) -> impl FnMut(Span<'a>) -> IResult<'a, char> {
    nom_char(c)
}

/// `OPENER [ element { SEP element } [ SEP ] ] CLOSER`, whitespace allowed
/// around every token.
///
/// Fails with `Error` only when `opener` is missing. Once the opener is
/// consumed any problem is a `Failure` reported as "unexpected .. in
/// `wherein`, expected `expected`".
pub fn separated_list<'a, F, O>(
    opener: char,
    closer: char,
    sep: char,
    mut element: F,
    wherein: &'static str,
    expected: &'static str,
) -> impl FnMut(Span<'a>) -> IResult<'a, Vec<O>>
where
    F: FnMut(Span<'a>) -> IResult<'a, O>,
{
    move |input: Span<'a>| {
        let (mut rest, _) = punct(opener)(input)?;
        let mut elements = Vec::new();

        loop {
            // Right after the opener or a separator: a closer or an element.
            let (r, _) = multispace0(rest)?;
            if let Ok((r, _)) = punct(closer)(r) {
                return Ok((r, elements));
            }

            let (r, elem) = match element(r) {
                Ok(v) => v,
                Err(nom::Err::Error(_)) => {
                    return Err(nom::Err::Failure(ParseError::partial(wherein, expected, r)))
                }
                Err(e) => return Err(e),
            };
            elements.push(elem);

            // Right after an element: a separator or a closer.
            let (r, _) = multispace0(r)?;
            if let Ok((r, _)) = punct(sep)(r) {
                rest = r;
                continue;
            }
            return match punct(closer)(r) {
                Ok((r, _)) => Ok((r, elements)),
                Err(_) => Err(nom::Err::Failure(ParseError::partial(wherein, expected, r))),
            };
        }
    }
}

pub fn maybe_lpadded<'a, F, O>(f: F) -> impl FnMut(Span<'a>) -> IResult<'a, O>
where
    F: FnMut(Span<'a>) -> IResult<'a, O>,
{
    preceded(multispace0, f)
}
