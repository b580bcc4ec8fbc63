mod encoder;
mod human;
mod json;

pub use encoder::{format_value, Encodable, Encoder};
pub use human::HumanReadableEncoder;
pub use json::JsonEncoder;
