use log::debug;

use crate::error::Result;
use crate::input::{ExpositionReader, LineReader};
use crate::output::{Encodable, Output};
use crate::query::{SampleQuery, SampleSet, Selector};
use crate::web::RequestConfig;

// query:
//   LineReader -> ExpositionReader -> SampleSet -> freeze (sort by name)
//     -> Selector (lookup by name, then label matchers) | max
//       -> Encoder -> Writer
//
// request:
//   YAML -> RequestConfig -> Request -> Encoder -> Writer

pub struct Runner {
    output: Output,
}

impl Runner {
    pub fn new(output: Output) -> Self {
        Self { output }
    }

    /// Loads every sample `reader` yields and writes out the selected ones, or
    /// only their maximum when `max` is set.
    pub fn query(
        &mut self,
        reader: Box<dyn LineReader>,
        selector: Option<&str>,
        max: bool,
        strict: bool,
    ) -> Result<()> {
        // Parse the selector first so a typo fails before any input is consumed.
        let selector = selector.map(Selector::parse).transpose()?;

        let mut set = SampleSet::new();
        ExpositionReader::new(reader)
            .strict(strict)
            .read_into(&mut set)?;

        let samples = set.freeze();
        let selected = match &selector {
            Some(selector) => selector.select(&samples),
            None => samples.iter().cloned().collect(),
        };
        debug!("selected {} out of {} samples", selected.len(), samples.len());

        if max {
            return self.output.write(&Encodable::Scalar(selected.max()));
        }

        // Runs of one name come out of the sort in no particular order.
        let mut ordered: Vec<_> = selected.iter().collect();
        ordered.sort_by_cached_key(|s| s.labels().to_string());
        for sample in ordered {
            self.output.write(&Encodable::Sample(sample))?;
        }
        Ok(())
    }

    /// Builds the request a YAML config describes and writes it out.
    pub fn request(&mut self, config: &str) -> Result<()> {
        let request = RequestConfig::from_yaml(config)?.create_request()?;
        self.output.write(&Encodable::Request(&request))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io::{self, Cursor};
    use std::rc::Rc;

    use super::*;
    use crate::error::ErrorKind;
    use crate::input::DelimReader;
    use crate::output::{HumanReadableEncoder, Writer};

    struct TestWriter(Rc<RefCell<Vec<String>>>);

    impl Writer for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<()> {
            self.0
                .borrow_mut()
                .push(String::from_utf8_lossy(buf).into_owned());
            Ok(())
        }
    }

    fn runner() -> (Runner, Rc<RefCell<Vec<String>>>) {
        let lines = Rc::new(RefCell::new(Vec::new()));
        let output = Output::new(
            Box::new(TestWriter(Rc::clone(&lines))),
            Box::new(HumanReadableEncoder::new()),
        );
        (Runner::new(output), lines)
    }

    fn reader(text: &'static str) -> Box<dyn LineReader> {
        Box::new(DelimReader::new(Cursor::new(text)))
    }

    const INPUT: &str = r#"# TYPE up gauge
up{job="node",instance="b"} 1
up{job="node",instance="a"} 0
go_goroutines{job="node"} 42
up{job="api",instance="c"} 1
"#;

    #[test]
    fn test_query_all() -> Result<()> {
        let (mut runner, lines) = runner();
        runner.query(reader(INPUT), None, false, false)?;
        assert_eq!(
            *lines.borrow(),
            vec![
                r#"go_goroutines{job="node"} 42"#,
                r#"up{job="api",instance="c"} 1"#,
                r#"up{job="node",instance="a"} 0"#,
                r#"up{job="node",instance="b"} 1"#,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_query_selector() -> Result<()> {
        let (mut runner, lines) = runner();
        runner.query(reader(INPUT), Some(r#"up{job="node"}"#), false, false)?;
        assert_eq!(
            *lines.borrow(),
            vec![
                r#"up{job="node",instance="a"} 0"#,
                r#"up{job="node",instance="b"} 1"#,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_query_max() -> Result<()> {
        let (mut runner, lines) = runner();
        runner.query(reader(INPUT), Some(r#"{job="node"}"#), true, false)?;
        runner.query(reader(INPUT), Some("down"), true, false)?;
        assert_eq!(*lines.borrow(), vec!["42", "-1.7976931348623157e308"]);
        Ok(())
    }

    #[test]
    fn test_query_errors() {
        let (mut runner, lines) = runner();

        let err = runner
            .query(reader(INPUT), Some("up{"), false, false)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);

        let err = runner
            .query(reader("up 1\nup{ 2\n"), None, false, true)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.message().starts_with("line 2, "));

        assert!(lines.borrow().is_empty());
    }

    #[test]
    fn test_request() -> Result<()> {
        let (mut runner, lines) = runner();
        runner.request("url: http://localhost:9100/metrics\n")?;
        assert_eq!(*lines.borrow(), vec!["GET http://localhost:9100/metrics"]);

        let err = runner.request("url: ftp://localhost/\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
        Ok(())
    }
}
