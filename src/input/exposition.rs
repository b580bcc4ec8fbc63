use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, space0, space1},
    combinator::{opt, rest as remaining},
    sequence::preceded,
};

use crate::common::parser::{
    label_identifier, maybe_lpadded, metric_identifier, number_literal, parse_all,
    separated_list, string_literal, timestamp_literal, IResult, ParseError, Span,
};
use crate::error::Result;
use crate::model::{Label, Labels, Sample, NAME_LABEL};

/// One line of the Prometheus text exposition format.
#[derive(Debug, PartialEq)]
pub enum Line {
    Blank,
    Comment(String),
    Help { metric: String, text: String },
    Type { metric: String, kind: MetricType },
    Sample(Sample),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Gauge,
    Histogram,
    Summary,
    Untyped,
}

impl From<&str> for MetricType {
    fn from(s: &str) -> Self {
        match s {
            "counter" => MetricType::Counter,
            "gauge" => MetricType::Gauge,
            "histogram" => MetricType::Histogram,
            "summary" => MetricType::Summary,
            _ => MetricType::Untyped,
        }
    }
}

/// Parses a single line, without its line terminator.
pub fn parse_line(input: &str) -> Result<Line> {
    parse_all(line, input.trim_end_matches(|c: char| c == '\n' || c == '\r'))
}

fn line(input: Span) -> IResult<Line> {
    let (rest, _) = space0(input)?;

    if rest.fragment().is_empty() {
        return Ok((rest, Line::Blank));
    }

    if rest.fragment().starts_with('#') {
        return comment(rest);
    }

    sample_line(rest)
}

fn comment(input: Span) -> IResult<Line> {
    let (rest, _) = char('#')(input)?;
    let (rest, _) = space0(rest)?;

    if let Ok(v) = metadata(rest) {
        return Ok(v);
    }

    let (rest, text) = remaining(rest)?;
    Ok((rest, Line::Comment(text.fragment().trim_end().to_string())))
}

fn metadata(input: Span) -> IResult<Line> {
    // HELP metric_name text
    // TYPE metric_name type

    let (rest, keyword) = alt((tag("HELP"), tag("TYPE")))(input)?;
    let (rest, metric) = preceded(space1, metric_identifier)(rest)?;
    let (rest, _) = space0(rest)?;
    let (rest, text) = remaining(rest)?;
    let text = text.fragment().trim_end();

    let line = match *keyword.fragment() {
        "HELP" => Line::Help {
            metric,
            text: unescape_help(text),
        },
        _ => Line::Type {
            metric,
            kind: MetricType::from(text),
        },
    };
    Ok((rest, line))
}

fn unescape_help(text: &str) -> String {
    let mut res = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            res.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => res.push('\n'),
            Some(c) => res.push(c),
            None => res.push('\\'),
        }
    }
    res
}

fn sample_line(input: Span) -> IResult<Line> {
    // metric_name [ "{" label_list "}" ] value [ timestamp ]
    // "{" label_list_with_name "}" value [ timestamp ]

    let (rest, metric) = opt(metric_identifier)(input)?;

    let (rest, pairs) = match maybe_lpadded(label_pairs)(rest) {
        Ok((r, pairs)) => (r, pairs),
        Err(nom::Err::Error(_)) if metric.is_some() => (rest, vec![]),
        Err(nom::Err::Error(_)) => {
            return Err(nom::Err::Failure(ParseError::partial(
                "sample",
                r#"metric name or "{""#,
                rest,
            )))
        }
        Err(e) => return Err(e),
    };

    for (i, label) in pairs.iter().enumerate() {
        if pairs[..i].iter().any(|l| l.name == label.name) {
            return Err(nom::Err::Failure(ParseError::new(
                format!("duplicate label name \"{}\"", label.name),
                input,
            )));
        }
    }

    let named_by_label = pairs.iter().any(|l| l.name == NAME_LABEL);
    let labels = match (metric, named_by_label) {
        (Some(_), true) => {
            return Err(nom::Err::Failure(ParseError::new(
                "metric name given twice".to_string(),
                input,
            )))
        }
        (None, false) => {
            return Err(nom::Err::Failure(ParseError::new(
                "sample without metric name".to_string(),
                input,
            )))
        }
        (Some(metric), false) => {
            let mut labels = Labels::new(metric);
            for label in pairs {
                labels.push(label.name, label.value);
            }
            labels
        }
        (None, true) => Labels::from_pairs(pairs.into_iter().map(|l| (l.name, l.value))),
    };

    let (rest, value) = match preceded(space1, number_literal)(rest) {
        Ok(v) => v,
        Err(nom::Err::Error(_)) => {
            let (at, _) = space0(rest)?;
            return Err(nom::Err::Failure(ParseError::partial(
                "sample", "value", at,
            )));
        }
        Err(e) => return Err(e),
    };

    // The timestamp is accepted but not kept, samples of one scrape share it.
    let (rest, _) = opt(preceded(space1, timestamp_literal))(rest)?;

    let (rest, _) = space0(rest)?;
    if !rest.fragment().is_empty() {
        return Err(nom::Err::Failure(ParseError::partial(
            "sample",
            "end of line",
            rest,
        )));
    }

    Ok((rest, Line::Sample(Sample::new(labels, value))))
}

fn label_pairs(input: Span) -> IResult<Vec<Label>> {
    separated_list(
        '{',
        '}',
        ',',
        label_pair,
        "label set",
        r#"identifier or "}""#,
    )(input)
}

fn label_pair(input: Span) -> IResult<Label> {
    // IDENTIFIER "=" STRING

    let (rest, name) = label_identifier(input)?;

    let (rest, _) = match maybe_lpadded(char('='))(rest) {
        Ok(v) => v,
        Err(_) => {
            return Err(nom::Err::Failure(ParseError::partial(
                "label set",
                "\"=\"",
                rest,
            )))
        }
    };

    let (rest, value) = match maybe_lpadded(string_literal)(rest) {
        Ok(v) => v,
        Err(nom::Err::Error(_)) => {
            return Err(nom::Err::Failure(ParseError::partial(
                "label set",
                "label value as string literal",
                rest,
            )))
        }
        Err(e) => return Err(e),
    };

    Ok((rest, Label::new(name, value)))
}
