use super::encoder::{format_value, Encodable, Encoder};
use crate::error::Result;
use crate::web::Request;

/// `name{label="value",...} value` per sample, in the exposition format's own
/// spelling.
pub struct HumanReadableEncoder {}

impl HumanReadableEncoder {
    pub fn new() -> Self {
        Self {}
    }

    fn encode_request(&self, req: &Request) -> Vec<u8> {
        let mut lines = vec![format!("{} {}", req.method(), req.url())];
        for (name, value) in req.headers() {
            lines.push(format!("{}: {}", name, value));
        }
        if let Some(body) = req.body() {
            lines.push(String::new());
            lines.push(body.to_string());
        }
        lines.join("\n").into_bytes()
    }
}

impl Default for HumanReadableEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for HumanReadableEncoder {
    fn encode(&self, value: &Encodable) -> Result<Vec<u8>> {
        Ok(match value {
            Encodable::Sample(sample) => {
                format!("{} {}", sample.labels(), format_value(sample.value())).into_bytes()
            }
            Encodable::Scalar(n) => format_value(*n).into_bytes(),
            Encodable::Request(req) => self.encode_request(req),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Labels, Sample};
    use crate::web::RequestConfig;

    fn encode(value: &Encodable) -> String {
        String::from_utf8(HumanReadableEncoder::new().encode(value).unwrap()).unwrap()
    }

    #[test]
    fn test_encode_sample() {
        let sample = Sample::new(
            Labels::from_pairs(vec![("__name__", "up"), ("job", "node")]),
            1.0,
        );
        assert_eq!(encode(&Encodable::Sample(&sample)), r#"up{job="node"} 1"#);

        let sample = Sample::new(Labels::new("temp"), -0.5);
        assert_eq!(encode(&Encodable::Sample(&sample)), "temp -0.5");
    }

    #[test]
    fn test_encode_scalar() {
        assert_eq!(encode(&Encodable::Scalar(3.0)), "3");
        assert_eq!(encode(&Encodable::Scalar(f64::INFINITY)), "+Inf");
        assert_eq!(encode(&Encodable::Scalar(f64::NEG_INFINITY)), "-Inf");
        assert_eq!(encode(&Encodable::Scalar(f64::NAN)), "NaN");
    }

    #[test]
    fn test_encode_request() {
        let mut cfg = RequestConfig {
            url: "http://localhost:9090/metrics".into(),
            method: "POST".into(),
            body: "q=up".into(),
            ..Default::default()
        };
        cfg.headers.insert("Accept".into(), "text/plain".into());

        let req = cfg.create_request().unwrap();
        assert_eq!(
            encode(&Encodable::Request(&req)),
            "POST http://localhost:9090/metrics\nAccept: text/plain\n\nq=up"
        );
    }
}
