use std::num::{NonZeroU64, NonZeroUsize};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chunkdrain::fetch::{self, FetchConfig};
use chunkdrain::httpbin::HttpBinResponse;
use chunkdrain::{DrainConfig, Drainer, SlowSource};
use clap::{Args, Parser, Subcommand};

const DEMO_TEXT: &str = "Hello, World!";

#[derive(Parser, Debug)]
#[clap(name = "chunkdrain", version)]
#[clap(about = "Fetch a URL and print its JSON body", long_about = None)]
struct Cli {
    /// Log progress to stderr, debug builds only (overridden by RUST_LOG)
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pretty-print the JSON body of a URL
    Get {
        #[clap(flatten)]
        fetch: FetchArgs,

        /// Print on a single line
        #[clap(long)]
        compact: bool,
    },

    /// Print the report of an httpbin-style echo endpoint
    Httpbin {
        #[clap(flatten)]
        fetch: FetchArgs,
    },

    /// Drain a deliberately fragmenting source and check the result
    Demo {
        #[clap(default_value = DEMO_TEXT)]
        text: String,
    },
}

#[derive(Args, Debug)]
struct FetchArgs {
    url: String,

    /// Deadline for the whole request, in seconds
    #[clap(long, default_value = "10")]
    timeout: NonZeroU64,

    /// Ignore proxy settings from the environment
    #[clap(long)]
    no_proxy: bool,

    /// Bytes offered to the body on every read
    #[clap(long, default_value = "512")]
    scratch_size: NonZeroUsize,

    /// Refuse bodies larger than this many bytes
    #[clap(long)]
    max_body: Option<usize>,
}

impl FetchArgs {
    fn config(&self) -> FetchConfig {
        FetchConfig {
            timeout: Duration::from_secs(self.timeout.get()),
            proxy: !self.no_proxy,
            drain: DrainConfig {
                scratch_size: self.scratch_size,
                max_len: self.max_body,
                ..DrainConfig::default()
            },
            ..FetchConfig::default()
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level),
    )
    .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Get { fetch: request, compact } => {
            let url = fetch::parse_url(&request.url)?;
            let value: serde_json::Value =
                fetch::fetch_json(&url, &request.config())
                    .with_context(|| format!("Failed to fetch {}", url))?;
            let rendered = if compact {
                serde_json::to_string(&value)?
            } else {
                serde_json::to_string_pretty(&value)?
            };
            println!("{}", rendered);
        }

        Command::Httpbin { fetch: request } => {
            let url = fetch::parse_url(&request.url)?;
            let response: HttpBinResponse =
                fetch::fetch_json(&url, &request.config())
                    .with_context(|| format!("Failed to fetch {}", url))?;
            print!("{}", response.render());
        }

        Command::Demo { text } => {
            let mut source = SlowSource::new(text.as_bytes());
            let drained = Drainer::default()
                .drain(&mut source)
                .context("Failed to read")?;
            log::debug!("demo drained in {} reads", drained.reads);
            if drained.bytes != text.as_bytes() {
                bail!(
                    "Unexpected output: got {:?}, want {:?}",
                    String::from_utf8_lossy(&drained.bytes),
                    text
                );
            }
            println!("output: {}", text);
        }
    }

    Ok(())
}
