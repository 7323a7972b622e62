use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dah_benchmarks::{run_sweep, BenchMode, SweepConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Sweep data availability header computation over square widths and
/// worker counts, printing mean and standard deviation per configuration.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// TOML file with sweep parameters. Flags override its values.
    #[clap(long)]
    config: Option<PathBuf>,

    /// Smallest extended width.
    #[clap(long)]
    min_width: Option<usize>,

    /// Largest extended width, inclusive.
    #[clap(long)]
    max_width: Option<usize>,

    #[clap(long)]
    width_step: Option<usize>,

    /// Comma separated worker counts.
    #[clap(long, value_delimiter = ',')]
    workers: Option<Vec<usize>>,

    /// Trials per configuration.
    #[clap(long)]
    repetitions: Option<usize>,

    #[clap(long, value_enum)]
    mode: Option<BenchMode>,

    #[clap(long)]
    seed: Option<u64>,

    /// Log filter used when RUST_LOG is unset.
    #[clap(long)]
    log_level: Option<String>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<SweepConfig> {
        let mut config = match &self.config {
            Some(path) => SweepConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SweepConfig::default(),
        };
        if let Some(min_width) = self.min_width {
            config.min_width = min_width;
        }
        if let Some(max_width) = self.max_width {
            config.max_width = max_width;
        }
        if let Some(width_step) = self.width_step {
            config.width_step = width_step;
        }
        if let Some(workers) = self.workers {
            config.worker_counts = workers;
        }
        if let Some(repetitions) = self.repetitions {
            config.repetitions = repetitions;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(log_level) = self.log_level {
            config.log_level = log_level;
        }
        Ok(config)
    }
}

fn init_logging(default_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Args::parse().into_config()?;
    init_logging(&config.log_level)?;
    info!(
        cpus = num_cpus::get(),
        mode = %config.mode,
        repetitions = config.repetitions,
        "starting sweep"
    );

    let report = run_sweep(&config)?;

    let mut previous_workers = None;
    println!("width workers threaded mean_ns +/- std_dev_ns");
    for result in &report.results {
        if previous_workers.is_some_and(|workers| workers != result.workers) {
            println!("----------");
        }
        previous_workers = Some(result.workers);
        println!("{result}");
    }

    for failure in &report.failures {
        eprintln!("failed: {failure:#}");
    }
    if !report.failures.is_empty() {
        anyhow::bail!("{} configurations failed", report.failures.len());
    }
    Ok(())
}
