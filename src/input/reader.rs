use log::{debug, trace, warn};

use super::exposition::{parse_line, Line};
use super::line::LineReader;
use crate::error::{Error, Result};
use crate::model::Sample;
use crate::query::SampleSet;

/// Turns exposition text into samples, skipping blank, comment and metadata
/// lines. Malformed lines are logged and skipped unless the reader is strict.
pub struct ExpositionReader {
    inner: Box<dyn LineReader>,
    line_no: usize,
    strict: bool,
}

impl ExpositionReader {
    pub fn new(inner: Box<dyn LineReader>) -> Self {
        Self {
            inner,
            line_no: 0,
            strict: false,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Reads till EOF, adding every sample to `set`. Returns how many were added.
    pub fn read_into(&mut self, set: &mut SampleSet) -> Result<usize> {
        let mut added = 0;
        while let Some(sample) = self.next() {
            set.add(sample?);
            added += 1;
        }
        debug!("read {} samples out of {} lines", added, self.line_no);
        Ok(added)
    }

    fn malformed(&self, err: Error) -> Option<Result<Sample>> {
        let err = Error::parse(&format!("line {}, {}", self.line_no, err.message()));
        if self.strict {
            return Some(Err(err));
        }
        warn!("skipping malformed exposition line: {}", err);
        None
    }
}

impl std::iter::Iterator for ExpositionReader {
    type Item = Result<Sample>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut buf = Vec::new();
            match self.inner.read(&mut buf) {
                Ok(0) => return None, // EOF
                Ok(_) => (),
                Err(e) => return Some(Err(e.into())),
            };

            self.line_no += 1;

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(_) => match self.malformed(Error::parse("line is not valid UTF-8")) {
                    Some(err) => return Some(err),
                    None => continue,
                },
            };

            match parse_line(line) {
                Ok(Line::Sample(sample)) => return Some(Ok(sample)),
                Ok(Line::Type { metric, kind }) => {
                    trace!("line {}: {} is a {:?}", self.line_no, metric, kind);
                }
                Ok(_) => (),
                Err(err) => {
                    if let Some(err) = self.malformed(err) {
                        return Some(err);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::input::DelimReader;
    use crate::query::SampleQuery;

    const EXPOSITION: &str = r#"# HELP node_cpu_seconds_total Seconds the CPUs spent in each mode.
# TYPE node_cpu_seconds_total counter
node_cpu_seconds_total{cpu="0",mode="idle"} 2258.45
node_cpu_seconds_total{cpu="0",mode="user"} 150.2

# TYPE node_load1 gauge
node_load1 0.42
this line is broken
node_cpu_seconds_total{cpu="1",mode="idle"} 2261.01
"#;

    fn reader(text: &'static str) -> ExpositionReader {
        ExpositionReader::new(Box::new(DelimReader::new(text.as_bytes())))
    }

    #[test]
    fn test_read_into_skips_malformed() -> Result<()> {
        let mut set = SampleSet::new();
        let added = reader(EXPOSITION).read_into(&mut set)?;
        assert_eq!(added, 4);
        assert_eq!(set.len(), 4);

        set.sort();
        assert_eq!(set.find_by_name("node_cpu_seconds_total").len(), 3);
        assert_eq!(set.find_by_name("node_load1").max(), 0.42);
        Ok(())
    }

    #[test]
    fn test_strict_reader_fails() {
        let mut set = SampleSet::new();
        let err = reader(EXPOSITION)
            .strict(true)
            .read_into(&mut set)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(
            err.message(),
            "line 8, column 6: unexpected 'l' in sample, expected value"
        );
        // Samples before the broken line are kept.
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_invalid_utf8() {
        let bytes: &'static [u8] = b"up 1\n\xff\xfe 2\ndown 0\n";
        let mut set = SampleSet::new();

        let added = ExpositionReader::new(Box::new(DelimReader::new(bytes)))
            .read_into(&mut set)
            .unwrap();
        assert_eq!(added, 2);

        let err = ExpositionReader::new(Box::new(DelimReader::new(bytes)))
            .strict(true)
            .read_into(&mut SampleSet::new())
            .unwrap_err();
        assert_eq!(err.message(), "line 2, line is not valid UTF-8");
    }
}
