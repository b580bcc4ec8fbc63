mod labels;
mod sample;
mod types;

pub use labels::*;
pub use sample::*;
pub use types::*;
