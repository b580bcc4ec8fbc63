mod samples;
mod selector;

pub use samples::{SampleQuery, SampleSet, SortedSamples};
pub use selector::Selector;
