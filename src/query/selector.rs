use std::convert::TryFrom;

use nom::{branch::alt, bytes::complete::tag, character::complete::multispace0};

use super::samples::{SampleQuery, SampleSet};
use crate::common::parser::{
    label_identifier, maybe_lpadded, metric_identifier, parse_all, separated_list,
    string_literal, IResult, ParseError, Span,
};
use crate::error::{Error, Result};
use crate::model::{LabelMatcher, MatchOp, MetricName};

/// `metric_name{label="value", ...}` as used on the command line.
#[derive(Debug, PartialEq)]
pub struct Selector {
    name: Option<MetricName>,
    matchers: Vec<LabelMatcher>,
}

impl Selector {
    pub fn new(name: Option<MetricName>, matchers: Vec<LabelMatcher>) -> Result<Self> {
        if name.is_none() && matchers.is_empty() {
            return Err(Error::invalid_config(
                "selector must contain a metric name or at least one label matcher",
            ));
        }
        Ok(Self { name, matchers })
    }

    pub fn parse(input: &str) -> Result<Self> {
        parse_all(selector, input)
    }

    pub fn name(&self) -> Option<&MetricName> {
        self.name.as_ref()
    }

    pub fn matchers(&self) -> &[LabelMatcher] {
        &self.matchers
    }

    /// Looks the metric name up, then applies every matcher in turn. When the
    /// selector has a name the samples must be sorted by name.
    pub fn select<Q: SampleQuery + ?Sized>(&self, samples: &Q) -> SampleSet {
        let base = match &self.name {
            Some(name) => samples.find_by_name(name),
            None => samples.samples(),
        };

        let mut matchers = self.matchers.iter();
        let mut res = match matchers.next() {
            Some(m) => base.filter(m),
            None => base.iter().cloned().collect(),
        };
        for m in matchers {
            res = res.filter(m);
        }
        res
    }
}

fn selector(input: Span) -> IResult<Selector> {
    //   metric_identifier label_matchers
    // | metric_identifier
    // | label_matchers

    let (rest, _) = multispace0(input)?;

    let (rest, metric) = match metric_identifier(rest) {
        Ok((r, m)) => (r, Some(m)),
        Err(_) => (rest, None),
    };

    let (rest, matchers) = match maybe_lpadded(label_matchers)(rest) {
        Ok((r, ms)) => (r, ms),
        Err(nom::Err::Error(_)) if metric.is_some() => (rest, vec![]),
        Err(nom::Err::Error(_)) => {
            return Err(nom::Err::Failure(ParseError::partial(
                "selector",
                r#"metric name or "{""#,
                rest,
            )))
        }
        Err(e) => return Err(e),
    };

    let (rest, _) = multispace0(rest)?;
    if !rest.fragment().is_empty() {
        return Err(nom::Err::Failure(ParseError::partial(
            "selector",
            "end of input",
            rest,
        )));
    }

    let selector = Selector::new(metric, matchers)
        .map_err(|e| nom::Err::Failure(ParseError::new(e.message().to_string(), input)))?;
    Ok((rest, selector))
}

fn label_matchers(input: Span) -> IResult<Vec<LabelMatcher>> {
    //   LEFT_BRACE label_match_list RIGHT_BRACE
    // | LEFT_BRACE label_match_list COMMA RIGHT_BRACE
    // | LEFT_BRACE RIGHT_BRACE

    separated_list(
        '{',
        '}',
        ',',
        label_matcher,
        "label matching",
        r#"identifier or "}""#,
    )(input)
}

fn label_matcher(input: Span) -> IResult<LabelMatcher> {
    // IDENTIFIER match_op STRING

    let (rest, label) = label_identifier(input)?;

    let (rest, op) = match maybe_lpadded(match_op)(rest) {
        Ok(v) => v,
        Err(_) => {
            return Err(nom::Err::Failure(ParseError::partial(
                "label matching",
                r#"one of "=", "!=", "=~", "!~""#,
                rest,
            )))
        }
    };

    let (rest, value) = match maybe_lpadded(string_literal)(rest) {
        Ok(v) => v,
        Err(_) => {
            return Err(nom::Err::Failure(ParseError::partial(
                "label matching",
                "label value as string literal",
                rest,
            )))
        }
    };

    let matcher = LabelMatcher::new(label, op, value).map_err(|e| {
        nom::Err::Failure(ParseError::new(e.to_string(), input).kind_of(e.kind()))
    })?;

    Ok((rest, matcher))
}

fn match_op(input: Span) -> IResult<MatchOp> {
    let (rest, m) = alt((tag("=~"), tag("!~"), tag("!="), tag("=")))(input)?;
    match MatchOp::try_from(*m.fragment()) {
        Ok(op) => Ok((rest, op)),
        Err(e) => Err(nom::Err::Failure(ParseError::new(
            e.message().to_string(),
            input,
        ))),
    }
}
