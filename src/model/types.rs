pub type LabelName = String;

pub type LabelValue = String;

pub type MetricName = String;

pub type SampleValue = f64;
