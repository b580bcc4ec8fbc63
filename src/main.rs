use std::fs::{self, File};
use std::io::{self, BufReader};

use log::debug;
use structopt::StructOpt;

use scrapeq::cliopt::{CliOpt, Command};
use scrapeq::error::{Error, ErrorKind};
use scrapeq::input::{DelimReader, LineReader};
use scrapeq::output::{LineWriter, Output};
use scrapeq::runner::Runner;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = CliOpt::from_args();

    let level = if opt.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    debug!("{:?}", opt);

    match opt.cmd {
        Command::Query(q) => {
            let reader: Box<dyn LineReader> = match &q.file {
                Some(path) => {
                    let file = File::open(path).map_err(|e| {
                        Error::from((format!("cannot open {}", path.display()), e))
                            .kind_of(ErrorKind::Io)
                    })?;
                    Box::new(DelimReader::new(BufReader::new(file)))
                }
                None => Box::new(DelimReader::new(BufReader::new(io::stdin()))),
            };

            let mut runner = Runner::new(Output::new(
                Box::new(LineWriter::new(io::stdout())),
                q.encode.encoder(),
            ));
            runner.query(reader, q.select.as_deref(), q.max, q.strict)?;
        }
        Command::Request(r) => {
            let config = fs::read_to_string(&r.config).map_err(|e| {
                Error::from((format!("cannot read {}", r.config.display()), e))
                    .kind_of(ErrorKind::Io)
            })?;

            let mut runner = Runner::new(Output::new(
                Box::new(LineWriter::new(io::stdout())),
                r.encode.encoder(),
            ));
            runner.request(&config)?;
        }
    }

    Ok(())
}
