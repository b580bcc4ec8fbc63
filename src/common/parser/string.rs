use nom::{character::complete::char, Slice};

use super::result::{IResult, ParseError, Span};

/// Double-quoted string with `\\`, `\"`, `\n` and `\t` escapes. Any other
/// escaped character stands for itself.
pub fn string_literal(input: Span) -> IResult<String> {
    let (rest, _) = char('"')(input)?;

    let mut value = String::new();
    let mut escaped = false;
    for (i, c) in rest.fragment().char_indices() {
        if escaped {
            value.push(match c {
                'n' => '\n',
                't' => '\t',
                c => c,
            });
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return Ok((rest.slice(i + 1..), value));
        } else {
            value.push(c);
        }
    }

    Err(nom::Err::Failure(ParseError::partial(
        "string literal",
        "closing '\"'",
        rest.slice(rest.fragment().len()..),
    )))
}
