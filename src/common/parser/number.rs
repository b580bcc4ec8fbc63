use nom::{
    bytes::complete::is_not,
    character::complete::{char, digit1},
    combinator::{opt, recognize},
    sequence::pair,
};

use super::result::{IResult, ParseError, Span};

/// Sample value: a float literal or one of `Inf`, `+Inf`, `-Inf`, `NaN`.
pub fn number_literal(input: Span) -> IResult<f64> {
    let (rest, token) = is_not(" \t\r\n")(input)?;
    match token.fragment().parse::<f64>() {
        Ok(n) => Ok((rest, n)),
        Err(_) => Err(nom::Err::Error(ParseError::new(
            format!("invalid number \"{}\"", token.fragment()),
            input,
        ))),
    }
}

/// Unix timestamp in milliseconds.
pub fn timestamp_literal(input: Span) -> IResult<i64> {
    let (rest, token) = recognize(pair(opt(char('-')), digit1))(input)?;
    match token.fragment().parse::<i64>() {
        Ok(ts) => Ok((rest, ts)),
        Err(_) => Err(nom::Err::Failure(ParseError::new(
            format!("timestamp \"{}\" out of range", token.fragment()),
            input,
        ))),
    }
}
