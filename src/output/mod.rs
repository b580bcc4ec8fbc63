mod encoder;
mod output;
mod writer;

pub use encoder::{format_value, Encodable, Encoder, HumanReadableEncoder, JsonEncoder};
pub use output::Output;
pub use writer::{LineWriter, Writer};
