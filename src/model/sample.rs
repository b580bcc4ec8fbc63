use super::labels::Labels;
use super::types::SampleValue;

/// One observation of a metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    labels: Labels,
    value: SampleValue,
}

impl Sample {
    pub fn new(labels: Labels, value: SampleValue) -> Self {
        Self { labels, value }
    }

    /// Value of the `__name__` label.
    #[inline]
    pub fn name(&self) -> &str {
        self.labels.name()
    }

    #[inline]
    pub fn value(&self) -> SampleValue {
        self.value
    }

    #[inline]
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn label(&self, name: &str) -> &str {
        self.labels.get(name)
    }
}
