use std::path::PathBuf;
use std::str::FromStr;

use structopt::StructOpt;

use crate::output::{Encoder, HumanReadableEncoder, JsonEncoder};

#[derive(Debug, StructOpt)]
#[structopt(name = "scrapeq", about = "Query scraped Prometheus samples")]
pub struct CliOpt {
    /// Log debug messages to stderr (RUST_LOG takes precedence)
    #[structopt(long = "verbose", short = "v")]
    pub verbose: bool,

    #[structopt(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Read exposition text from FILE (or stdin) and query it
    Query(QueryOpt),
    /// Build the request described by a YAML config and print it
    Request(RequestOpt),
}

#[derive(Debug, StructOpt)]
pub struct QueryOpt {
    /// Selector such as 'http_requests_total{code=~"5.."}'
    #[structopt(long = "select", short = "s")]
    pub select: Option<String>,

    /// Print only the largest value of the selected samples
    #[structopt(long = "max")]
    pub max: bool,

    /// Fail on the first malformed line instead of skipping it
    #[structopt(long = "strict")]
    pub strict: bool,

    #[structopt(long = "encode", short = "e", default_value = "human")]
    pub encode: Encoding,

    #[structopt(parse(from_os_str))]
    pub file: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
pub struct RequestOpt {
    #[structopt(long = "encode", short = "e", default_value = "human")]
    pub encode: Encoding,

    #[structopt(parse(from_os_str))]
    pub config: PathBuf,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Encoding {
    Human,
    Json,
}

impl Encoding {
    pub fn encoder(&self) -> Box<dyn Encoder> {
        match self {
            Encoding::Human => Box::new(HumanReadableEncoder::new()),
            Encoding::Json => Box::new(JsonEncoder::new()),
        }
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h" | "human" => Ok(Encoding::Human),
            "j" | "json" => Ok(Encoding::Json),
            _ => Err(format!("unknown encoding {:?}, expected human or json", s)),
        }
    }
}
