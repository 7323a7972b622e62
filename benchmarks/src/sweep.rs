use std::fmt;

use dah::OperationCost;
use itertools::iproduct;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{info, warn};

use crate::{aggregate, run_trial, BenchError, BenchMode, BenchmarkSample, SweepConfig};

/// Summary of every trial run for one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    /// Extended width.
    pub width: usize,
    /// Worker count.
    pub workers: usize,
    /// Whether the parallel strategy ran.
    pub threaded: bool,
    /// Stages that were timed.
    pub mode: BenchMode,
    /// Number of trials summarized.
    pub samples: usize,
    /// Mean duration.
    pub mean_ns: f64,
    /// Population standard deviation of the durations.
    pub std_dev_ns: f64,
    /// Engine cost of a single trial.
    pub cost: OperationCost,
}

impl BenchmarkResult {
    /// Reduce the samples of one configuration.
    pub fn from_samples(samples: &[BenchmarkSample]) -> Result<Self, BenchError> {
        let durations: Vec<u64> = samples.iter().map(|sample| sample.duration_ns).collect();
        let summary = aggregate(&durations)?;
        let first = &samples[0];
        Ok(BenchmarkResult {
            width: first.width,
            workers: first.workers,
            threaded: first.threaded,
            mode: first.mode,
            samples: summary.count,
            mean_ns: summary.mean_ns,
            std_dev_ns: summary.std_dev_ns,
            cost: first.cost,
        })
    }
}

impl fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {:.0} +/- {:.0}",
            self.width, self.workers, self.threaded, self.mean_ns, self.std_dev_ns
        )
    }
}

/// Results of a sweep, in sweep order, and the configurations that failed.
#[derive(Debug, Default)]
pub struct SweepReport {
    /// One entry per configuration whose trials all succeeded.
    pub results: Vec<BenchmarkResult>,
    /// One entry per abandoned configuration.
    pub failures: Vec<BenchError>,
}

/// Run the sweep described by `config`.
pub fn run_sweep(config: &SweepConfig) -> Result<SweepReport, BenchError> {
    config.validate()?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok(sweep(
        &config.widths(),
        &config.worker_counts,
        config.repetitions,
        config.mode,
        &mut rng,
    ))
}

/// Time root computation together with extension for every pair of
/// `worker_counts` and `widths`, `repetitions` trials each.
///
/// Invalid widths or worker counts are reported as failures of their
/// configuration rather than aborting the sweep.
pub fn run_sweep_with(
    widths: &[usize],
    worker_counts: &[usize],
    repetitions: usize,
) -> Result<SweepReport, BenchError> {
    if repetitions == 0 {
        return Err(BenchError::InvalidConfig(
            "repetitions must be positive".to_string(),
        ));
    }
    Ok(sweep(
        widths,
        worker_counts,
        repetitions,
        BenchMode::Combined,
        &mut StdRng::from_entropy(),
    ))
}

fn sweep<R: Rng + ?Sized>(
    widths: &[usize],
    worker_counts: &[usize],
    repetitions: usize,
    mode: BenchMode,
    rng: &mut R,
) -> SweepReport {
    let mut report = SweepReport::default();
    for (&workers, &width) in iproduct!(worker_counts, widths) {
        let threaded = workers > 1;
        let samples: Result<Vec<_>, _> = (0..repetitions)
            .map(|_| run_trial(width, workers, threaded, mode, rng))
            .collect();

        match samples.and_then(|samples| BenchmarkResult::from_samples(&samples)) {
            Ok(result) => {
                info!(
                    width,
                    workers,
                    %mode,
                    mean_ns = result.mean_ns,
                    std_dev_ns = result.std_dev_ns,
                    "configuration measured"
                );
                report.results.push(result);
            }
            Err(e) => {
                warn!(width, workers, %mode, error = %e, "configuration failed");
                report.failures.push(e);
            }
        }
    }
    report
}
