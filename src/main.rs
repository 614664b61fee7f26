use bulk::{
    BulkCoordinator,
    config::Config,
    input::CommandReader,
    report::FileReporter,
};
use clap::Parser;
use std::path::PathBuf;
use tokio::io::{BufReader, stdin};
use tokio::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Group commands read from stdin into bulks and log each bulk to its own file.
///
/// A line holding only `{` starts a dynamic block and a line holding only `}`
/// ends it; everything else is a command.
#[derive(Debug, Parser)]
#[command(name = "bulk", version)]
struct Cli {
    /// Commands per static bulk (overrides the config file)
    capacity: Option<usize>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Delay after each input line, in milliseconds
    #[arg(long)]
    pace_ms: Option<u64>,

    /// Directory report files are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl Cli {
    /// Load the config file, if any, and apply command line overrides on top
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(capacity) = self.capacity {
            config.bulk.capacity = Some(capacity);
        }
        if let Some(pace_ms) = self.pace_ms {
            config.input.pacing_ms = pace_ms;
        }
        if let Some(dir) = self.output_dir {
            config.report.directory = dir;
        }
        Ok(config)
    }
}

/// Reads commands from stdin until end of input, printing and logging each bulk.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only the bulks themselves.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse the command line and layer it over the config file, if one was given.
    let config = Cli::parse().into_config()?;
    // Reject a missing or zero capacity before any input is read.
    let capacity = config.capacity()?;
    info!("Bulk starting with config: {:?}", config);

    // Bulks are mirrored to stdout and written to one new file per flush.
    let reporter = FileReporter::stdout(&config.report);
    // The coordinator owns both bulks and routes every line to one of them.
    let mut coordinator = BulkCoordinator::new(capacity, reporter);

    // Read stdin line by line until end of input, pausing between lines if configured.
    let reader = CommandReader::new(
        BufReader::new(stdin()),
        Duration::from_millis(config.input.pacing_ms),
    );
    // Runs to end of stream, then reports the final static bulk.
    // Any reporting failure aborts the process with the error.
    let summary = reader.run(&mut coordinator).await?;
    info!("Bulk finished: {:?}", summary);

    Ok(())
}
