mod exposition;
mod line;
mod reader;

pub use exposition::{parse_line, Line, MetricType};
pub use line::{DelimReader, LineReader};
pub use reader::ExpositionReader;
