use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::Path;
use std::rc::Rc;

use structopt::StructOpt;

use scrapeq::cliopt::{CliOpt, Command};
use scrapeq::input::DelimReader;
use scrapeq::output::{LineWriter, Output, Writer};
use scrapeq::runner::Runner;

#[test]
fn e2e() -> Result<(), Box<dyn std::error::Error>> {
    let root_test_dir = Path::new(file!()).parent().unwrap().join("scenarios");

    for test_dir in fs::read_dir(&root_test_dir)? {
        let test_dir = test_dir?.path();

        if let Ok(filter) = std::env::var("E2E_CASE") {
            if !test_dir.as_os_str().to_string_lossy().ends_with(&filter) {
                continue;
            }
        }

        let cli_args: Vec<String> =
            serde_json::from_str(&fs::read_to_string(test_dir.join("args.json"))?)?;

        let actual_output = run(&test_dir, &cli_args)?;
        let expected_output = fs::read(test_dir.join("output"))?;

        assert_eq!(
            expected_output,
            actual_output,
            "\nUnexpected result in '{}'.\nExpected:\n{}\nActual:\n{}",
            test_dir.display(),
            String::from_utf8_lossy(&expected_output),
            String::from_utf8_lossy(&actual_output),
        );
    }

    Ok(())
}

fn run(test_dir: &Path, cli_args: &[String]) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let opt = CliOpt::from_iter(cli_args);

    let writer = Rc::new(RefCell::new(LineWriter::new(Vec::new())));

    struct TestWriter<W>(Rc<RefCell<W>>);

    impl<W: Writer> Writer for TestWriter<W> {
        fn write(&mut self, buf: &[u8]) -> io::Result<()> {
            self.0.borrow_mut().write(buf)
        }
    }

    match opt.cmd {
        Command::Query(q) => {
            let mut runner = Runner::new(Output::new(
                Box::new(TestWriter(Rc::clone(&writer))),
                q.encode.encoder(),
            ));
            let input = io::BufReader::new(fs::File::open(test_dir.join("input"))?);
            runner.query(
                Box::new(DelimReader::new(input)),
                q.select.as_deref(),
                q.max,
                q.strict,
            )?;
        }
        Command::Request(r) => {
            let mut runner = Runner::new(Output::new(
                Box::new(TestWriter(Rc::clone(&writer))),
                r.encode.encoder(),
            ));
            runner.request(&fs::read_to_string(test_dir.join(&r.config))?)?;
        }
    }

    // The runner is gone by now, so is its clone of the writer.
    let writer = match Rc::try_unwrap(writer) {
        Ok(writer) => writer,
        _ => unreachable!(),
    };

    Ok(writer.into_inner().into_inner())
}
