use std::convert::TryFrom;
use std::fmt;

use regex::Regex;

use super::types::{LabelName, LabelValue, MetricName};
use crate::error::{Error, ErrorKind, Result};

pub const NAME_LABEL: &str = "__name__";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label {
    pub name: LabelName,
    pub value: LabelValue,
}

impl Label {
    pub fn new<N, V>(name: N, value: V) -> Self
    where
        N: Into<LabelName>,
        V: Into<LabelValue>,
    {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=\"{}\"", self.name, escape(&self.value))
    }
}

/// Ordered label set. The `__name__` label always sits at position 0, so the
/// metric name is read positionally and never searched for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Labels(Vec<Label>);

impl Labels {
    pub fn new<N: Into<MetricName>>(name: N) -> Self {
        Self(vec![Label::new(NAME_LABEL, name.into())])
    }

    /// Builds a label set out of arbitrary ordered pairs. A `__name__` pair is
    /// moved to the front; without one the name is empty.
    pub fn from_pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<LabelName>,
        V: Into<LabelValue>,
    {
        let mut labels = Self::new("");
        for (name, value) in pairs {
            labels.push(name, value);
        }
        labels
    }

    /// Appends a label. Setting `__name__` replaces the name in place.
    pub fn push<N, V>(&mut self, name: N, value: V)
    where
        N: Into<LabelName>,
        V: Into<LabelValue>,
    {
        let label = Label::new(name, value);
        if label.name == NAME_LABEL {
            self.0[0].value = label.value;
        } else {
            self.0.push(label);
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.0[0].value
    }

    /// Value of the named label, or the empty string when the label is absent.
    pub fn get(&self, name: &str) -> &str {
        self.0
            .iter()
            .find(|l| l.name == name)
            .map(|l| l.value.as_str())
            .unwrap_or("")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|l| l.name == name)
    }

    /// Labels other than `__name__`, in insertion order.
    pub fn without_name(&self) -> &[Label] {
        &self.0[1..]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Label> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        // The name label is always there.
        false
    }
}

impl fmt::Display for Labels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        if self.without_name().is_empty() {
            return Ok(());
        }
        write!(f, "{{")?;
        for (i, label) in self.without_name().iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", label)?;
        }
        write!(f, "}}")
    }
}

fn escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[derive(Debug)]
pub struct LabelMatcher {
    label: LabelName,
    match_op: MatchOp,
    value: LabelValue,
    re: Option<Regex>,
}

impl LabelMatcher {
    pub fn new<N, V>(label: N, match_op: MatchOp, value: V) -> Result<Self>
    where
        N: Into<LabelName>,
        V: Into<LabelValue>,
    {
        let label = label.into();
        let value = value.into();

        if label.is_empty() {
            return Err(Error::invalid_config("label matcher needs a label name"));
        }

        let re = match match_op {
            MatchOp::EqlRe | MatchOp::NeqRe => Some(
                Regex::new(&format!("^(?:{})$", value)).map_err(|e| {
                    Error::from(("bad label matcher regex", e))
                        .kind_of(ErrorKind::InvalidConfiguration)
                })?,
            ),
            _ => None,
        };

        Ok(Self {
            label,
            match_op,
            value,
            re,
        })
    }

    pub fn name_matcher<V>(name: V) -> Self
    where
        V: Into<LabelValue>,
    {
        Self {
            label: NAME_LABEL.to_string(),
            match_op: MatchOp::Eql,
            value: name.into(),
            re: None,
        }
    }

    pub fn label(&self) -> &LabelName {
        &self.label
    }

    pub fn match_op(&self) -> MatchOp {
        self.match_op
    }

    pub fn value(&self) -> &LabelValue {
        &self.value
    }

    pub fn is_name_matcher(&self) -> bool {
        self.label == NAME_LABEL
    }

    pub fn matches(&self, v: &str) -> bool {
        match (self.match_op, &self.re) {
            (MatchOp::Eql, _) => self.value == v,
            (MatchOp::Neq, _) => self.value != v,
            (MatchOp::EqlRe, Some(re)) => re.is_match(v),
            (MatchOp::NeqRe, Some(re)) => !re.is_match(v),
            // Regex ops always carry a compiled pattern, see new().
            (_, None) => false,
        }
    }
}

impl PartialEq for LabelMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.match_op == other.match_op && self.value == other.value
    }
}

impl fmt::Display for LabelMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}\"{}\"", self.label, self.match_op, escape(&self.value))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MatchOp {
    Eql,
    Neq,
    EqlRe,
    NeqRe,
}

impl TryFrom<&str> for MatchOp {
    type Error = Error;

    fn try_from(op: &str) -> Result<Self> {
        match op {
            "=" => Ok(MatchOp::Eql),
            "!=" => Ok(MatchOp::Neq),
            "=~" => Ok(MatchOp::EqlRe),
            "!~" => Ok(MatchOp::NeqRe),
            _ => Err(Error::parse("Unexpected match op literal")),
        }
    }
}

impl fmt::Display for MatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            MatchOp::Eql => "=",
            MatchOp::Neq => "!=",
            MatchOp::EqlRe => "=~",
            MatchOp::NeqRe => "!~",
        };
        write!(f, "{}", op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_always_first() {
        let labels = Labels::from_pairs(vec![("env", "prod"), ("__name__", "cpu"), ("a", "b")]);
        assert_eq!(labels.name(), "cpu");
        assert_eq!(labels.iter().next().unwrap().name, NAME_LABEL);
        assert_eq!(labels.len(), 3);
        assert_eq!(
            labels.without_name(),
            &[Label::new("env", "prod"), Label::new("a", "b")][..]
        );
    }

    #[test]
    fn test_nameless_pairs_have_empty_name() {
        let labels = Labels::from_pairs(vec![("env", "prod")]);
        assert_eq!(labels.name(), "");
    }

    #[test]
    fn test_get_absent_label_is_empty() {
        let mut labels = Labels::new("up");
        labels.push("job", "node");
        assert_eq!(labels.get("job"), "node");
        assert_eq!(labels.get("instance"), "");
        assert_eq!(labels.get(NAME_LABEL), "up");
        assert!(labels.contains("job"));
        assert!(!labels.contains("instance"));
    }

    #[test]
    fn test_display() {
        let mut labels = Labels::new("http_requests_total");
        assert_eq!(labels.to_string(), "http_requests_total");

        labels.push("code", "200");
        labels.push("path", "/a\"b");
        assert_eq!(
            labels.to_string(),
            r#"http_requests_total{code="200",path="/a\"b"}"#
        );
    }

    #[test]
    fn test_matcher_ops() {
        #[rustfmt::skip]
        let tests = [
            (MatchOp::Eql, "prod", "prod", true),
            (MatchOp::Eql, "prod", "dev", false),
            (MatchOp::Eql, "", "", true),
            (MatchOp::Neq, "prod", "dev", true),
            (MatchOp::Neq, "prod", "prod", false),
            (MatchOp::EqlRe, "pr.*", "prod", true),
            (MatchOp::EqlRe, "pr", "prod", false),
            (MatchOp::EqlRe, "prod|dev", "dev", true),
            (MatchOp::NeqRe, "pr.*", "prod", false),
            (MatchOp::NeqRe, "pr.*", "dev", true),
            (MatchOp::NeqRe, ".+", "", true),
        ];

        for (op, value, input, expected) in &tests {
            let m = LabelMatcher::new("env", *op, *value).unwrap();
            assert_eq!(
                m.matches(input),
                *expected,
                "{} against {:?}",
                m,
                input
            );
        }
    }

    #[test]
    fn test_matcher_bad_regex() {
        let err = LabelMatcher::new("env", MatchOp::EqlRe, "(").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }

    #[test]
    fn test_matcher_empty_label() {
        assert!(LabelMatcher::new("", MatchOp::Eql, "x").is_err());
    }

    #[test]
    fn test_name_matcher() {
        let m = LabelMatcher::name_matcher("cpu");
        assert!(m.is_name_matcher());
        assert!(m.matches("cpu"));
        assert_eq!(m, LabelMatcher::new(NAME_LABEL, MatchOp::Eql, "cpu").unwrap());
    }

    #[test]
    fn test_match_op_try_from() {
        assert_eq!(MatchOp::try_from("=~").unwrap(), MatchOp::EqlRe);
        assert_eq!(MatchOp::try_from("!~").unwrap(), MatchOp::NeqRe);
        assert!(MatchOp::try_from("~").is_err());
    }
}
