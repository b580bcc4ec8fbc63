use crate::error::Result;
use crate::model::{Sample, SampleValue};
use crate::web::Request;

pub enum Encodable<'a> {
    Sample(&'a Sample),
    Scalar(SampleValue),
    Request(&'a Request),
}

pub trait Encoder {
    fn encode(&self, value: &Encodable) -> Result<Vec<u8>>;
}

/// Prometheus spelling of sample values. Magnitudes from 1e21 up and below
/// 1e-4 switch to exponent notation.
pub fn format_value(value: SampleValue) -> String {
    if value.is_nan() {
        String::from("NaN")
    } else if value == SampleValue::INFINITY {
        String::from("+Inf")
    } else if value == SampleValue::NEG_INFINITY {
        String::from("-Inf")
    } else if value != 0.0 && (value.abs() >= 1e21 || value.abs() < 1e-4) {
        format!("{:e}", value)
    } else {
        value.to_string()
    }
}
