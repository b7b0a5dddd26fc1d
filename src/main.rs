use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, util::SubscriberInitExt};

use flowlog_tagger::Error;
use flowlog_tagger::pipeline::{self, Config, Outcome};

#[derive(Parser)]
#[command(name = "flowlog-tagger")]
#[command(about = "Tag VPC flow log records by destination port and protocol", long_about = None)]
struct Cli {
    /// The path to the log file. It should be a plain text AWS version 2 flow log file.
    log_file_path: PathBuf,

    /// The path to the lookup table file. It should be a csv file with header dstport,protocol,tag.
    lookup_file_path: PathBuf,

    /// The path and name of the output file. If it exists, the program will not run.
    #[arg(long = "output_path", visible_alias = "output-path", default_value = "counts.txt")]
    output_path: PathBuf,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish()
        .try_init()
        .map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))?;

    let cli = Cli::parse();
    let config = Config {
        log_path: cli.log_file_path,
        lookup_path: cli.lookup_file_path,
        output_path: cli.output_path,
    };

    match pipeline::run(&config) {
        Ok(Outcome::Written(path)) => {
            println!("Successfully write output to {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Ok(Outcome::OutputExists(path)) => {
            println!("{}", Error::OutputExists { path });
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            tracing::debug!(error = ?failure, "report run failed");
            for line in failure.messages() {
                println!("{line}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
