use std::iter::FromIterator;

use crate::error::{Error, Result};
use crate::model::{LabelMatcher, Sample, SampleValue};

/// Read-only queries over a sequence of samples.
///
/// `filter` and `max` work in any order. `find_by_name` assumes the samples
/// are sorted by name and silently returns a wrong answer otherwise.
pub trait SampleQuery {
    fn samples(&self) -> &[Sample];

    /// Returns the contiguous run of samples named `name`, or an empty slice.
    ///
    /// O(log n) to find the start of the run plus O(k) to walk a run of k
    /// samples. The samples must be sorted by name.
    fn find_by_name(&self, name: &str) -> &[Sample] {
        let samples = self.samples();

        let from = samples.partition_point(|s| s.name() < name);
        if from == samples.len() || samples[from].name() != name {
            return &[];
        }

        let mut until = from + 1;
        while until < samples.len() && samples[until].name() == name {
            until += 1;
        }
        &samples[from..until]
    }

    /// Returns a new set holding copies of the samples whose `matcher.label()`
    /// value (empty string when absent) satisfies the matcher. Input order is
    /// kept.
    fn filter(&self, matcher: &LabelMatcher) -> SampleSet {
        let mut res = SampleSet::new();
        for sample in self.samples() {
            if matcher.matches(sample.label(matcher.label())) {
                res.add(sample.clone());
            }
        }
        res
    }

    /// Largest sample value, or `f64::MIN` when there are no samples. NaN
    /// values never win.
    fn max(&self) -> SampleValue {
        let mut max = SampleValue::MIN;
        for sample in self.samples() {
            if max < sample.value() {
                max = sample.value();
            }
        }
        max
    }
}

impl SampleQuery for [Sample] {
    fn samples(&self) -> &[Sample] {
        self
    }
}

/// Samples collected during one scrape cycle.
///
/// The set is filled with `add`, sorted once with `sort` and then queried.
/// Adding after sorting breaks `find_by_name` until the next `sort`; the set
/// keeps a private flag only for `try_find_by_name`. `reset` empties the set
/// but keeps the allocation for the next cycle.
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    samples: Vec<Sample>,
    sorted: bool,
}

impl SampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            sorted: false,
        }
    }

    #[inline]
    pub fn add(&mut self, sample: Sample) {
        self.samples.push(sample);
        self.sorted = false;
    }

    pub fn reset(&mut self) {
        self.samples.clear();
        self.sorted = false;
    }

    /// Sorts by name. Samples sharing a name end up in no particular order.
    pub fn sort(&mut self) {
        self.samples
            .sort_unstable_by(|a, b| a.name().as_bytes().cmp(b.name().as_bytes()));
        self.sorted = true;
    }

    /// Like `find_by_name`, but refuses to answer for a set that was mutated
    /// since the last `sort`.
    pub fn try_find_by_name(&self, name: &str) -> Result<&[Sample]> {
        if !self.sorted && self.samples.len() > 1 {
            return Err(Error::precondition(&format!(
                "lookup of {:?} on a sample set that is not sorted by name",
                name
            )));
        }
        Ok(self.find_by_name(name))
    }

    /// Sorts the set and locks it against further mutation.
    pub fn freeze(mut self) -> SortedSamples {
        self.sort();
        SortedSamples { set: self }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.samples.capacity()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }
}

impl SampleQuery for SampleSet {
    fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

impl PartialEq for SampleSet {
    fn eq(&self, other: &Self) -> bool {
        self.samples == other.samples
    }
}

impl FromIterator<Sample> for SampleSet {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
            sorted: false,
        }
    }
}

impl Extend<Sample> for SampleSet {
    fn extend<I: IntoIterator<Item = Sample>>(&mut self, iter: I) {
        for sample in iter {
            self.add(sample);
        }
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// A name-sorted sample set that can no longer be mutated, so `find_by_name`
/// is always correct on it.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedSamples {
    set: SampleSet,
}

impl SortedSamples {
    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.set.iter()
    }

    /// Hands the storage back, emptied, for the next scrape cycle.
    pub fn thaw(self) -> SampleSet {
        let mut set = self.set;
        set.reset();
        set
    }
}

impl SampleQuery for SortedSamples {
    fn samples(&self) -> &[Sample] {
        self.set.as_slice()
    }
}
