use std::collections::BTreeMap;

use serde::Serialize;

use super::encoder::{format_value, Encodable, Encoder};
use crate::error::Result;
use crate::model::{Sample, SampleValue};
use crate::web::{Method, Request};

#[derive(Serialize)]
struct SampleRepr<'a> {
    name: &'a str,
    labels: BTreeMap<&'a str, &'a str>,
    value: serde_json::Value,
}

#[derive(Serialize)]
struct RequestRepr<'a> {
    method: Method,
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<&'a str>,
    /// `[name, value]` pairs in request order, a name may repeat.
    headers: Vec<(&'a str, &'a str)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
}

/// One JSON document per sample. Non-finite values are written as strings
/// since JSON has no numbers for them.
pub struct JsonEncoder {}

impl JsonEncoder {
    pub fn new() -> Self {
        Self {}
    }

    fn encode_sample(&self, sample: &Sample) -> Result<Vec<u8>> {
        let repr = SampleRepr {
            name: sample.name(),
            labels: sample
                .labels()
                .without_name()
                .iter()
                .map(|l| (l.name.as_str(), l.value.as_str()))
                .collect(),
            value: json_value(sample.value()),
        };
        serde_json::to_vec(&repr).map_err(|e| ("JSON serialization failed", e).into())
    }

    fn encode_request(&self, req: &Request) -> Result<Vec<u8>> {
        let repr = RequestRepr {
            method: req.method(),
            url: req.url().as_str(),
            host: req.host(),
            headers: req
                .headers()
                .iter()
                .map(|(n, v)| (n.as_str(), v.as_str()))
                .collect(),
            body: req.body(),
        };
        serde_json::to_vec(&repr).map_err(|e| ("JSON serialization failed", e).into())
    }
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

fn json_value(value: SampleValue) -> serde_json::Value {
    if value.is_finite() {
        serde_json::Value::from(value)
    } else {
        serde_json::Value::String(format_value(value))
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, value: &Encodable) -> Result<Vec<u8>> {
        match value {
            Encodable::Sample(sample) => self.encode_sample(sample),
            Encodable::Scalar(n) => serde_json::to_vec(&json_value(*n))
                .map_err(|e| ("JSON serialization failed", e).into()),
            Encodable::Request(req) => self.encode_request(req),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Labels;
    use crate::web::RequestConfig;

    fn encode(value: &Encodable) -> String {
        String::from_utf8(JsonEncoder::new().encode(value).unwrap()).unwrap()
    }

    #[test]
    fn test_encode_sample() {
        let sample = Sample::new(
            Labels::from_pairs(vec![("zone", "b"), ("__name__", "up"), ("job", "node")]),
            1.0,
        );
        assert_eq!(
            encode(&Encodable::Sample(&sample)),
            r#"{"name":"up","labels":{"job":"node","zone":"b"},"value":1.0}"#
        );

        let sample = Sample::new(Labels::new("x"), f64::NAN);
        assert_eq!(
            encode(&Encodable::Sample(&sample)),
            r#"{"name":"x","labels":{},"value":"NaN"}"#
        );
    }

    #[test]
    fn test_encode_scalar() {
        assert_eq!(encode(&Encodable::Scalar(0.42)), "0.42");
        assert_eq!(encode(&Encodable::Scalar(f64::NEG_INFINITY)), r#""-Inf""#);
    }

    #[test]
    fn test_encode_request() {
        let mut cfg = RequestConfig {
            url: "https://example.com/metrics".into(),
            ..Default::default()
        };
        cfg.headers.insert("Host".into(), "example.org".into());

        let req = cfg.create_request().unwrap();
        assert_eq!(
            encode(&Encodable::Request(&req)),
            r#"{"method":"GET","url":"https://example.com/metrics","host":"example.org","headers":[["Host","example.org"]]}"#
        );
    }

    #[test]
    fn test_encode_request_repeated_header() {
        let mut cfg = RequestConfig {
            url: "http://localhost/metrics".into(),
            username: "u".into(),
            password: "p".into(),
            ..Default::default()
        };
        cfg.headers.insert("Authorization".into(), "Bearer t".into());

        let req = cfg.create_request().unwrap();
        assert_eq!(
            encode(&Encodable::Request(&req)),
            r#"{"method":"GET","url":"http://localhost/metrics","headers":[["Authorization","Basic dTpw"],["Authorization","Bearer t"]]}"#
        );
    }
}
