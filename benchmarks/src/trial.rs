use std::{fmt, hint::black_box, time::Instant};

use dah::{
    compute_header_parallel, compute_header_single, mock::mock_shares, CostResult,
    DataAvailabilityHeader, ExtendedDataSquare, HeaderDigest, NamespacedShare, OperationCost,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::BenchError;

/// Which pipeline stages a trial times.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum BenchMode {
    /// Extension and root computation.
    #[default]
    Combined,
    /// Root computation over a square extended before the clock starts.
    RootsOnly,
    /// Extension alone.
    ErasureOnly,
}

impl fmt::Display for BenchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchMode::Combined => f.write_str("combined"),
            BenchMode::RootsOnly => f.write_str("roots-only"),
            BenchMode::ErasureOnly => f.write_str("erasure-only"),
        }
    }
}

/// One timed trial.
#[derive(Debug, Clone)]
pub struct BenchmarkSample {
    /// Extended width.
    pub width: usize,
    /// Worker count.
    pub workers: usize,
    /// Whether the parallel strategy ran.
    pub threaded: bool,
    /// Stages that were timed.
    pub mode: BenchMode,
    /// Wall-clock time of the timed stages.
    pub duration_ns: u64,
    /// Hashing work done by the engine.
    pub cost: OperationCost,
    /// Digest of the computed header, when roots were computed.
    pub digest: Option<HeaderDigest>,
}

/// Time one trial on a freshly generated square of extended `width`.
///
/// Share generation is never timed. With `threaded` unset the single
/// threaded engine and extension run regardless of `workers`.
pub fn run_trial<R: Rng + ?Sized>(
    width: usize,
    workers: usize,
    threaded: bool,
    mode: BenchMode,
    rng: &mut R,
) -> Result<BenchmarkSample, BenchError> {
    let failed = |source: dah::Error| BenchError::Trial {
        width,
        workers,
        source,
    };
    if workers == 0 {
        return Err(failed(dah::Error::NoWorkers));
    }
    if width == 0 || width % 2 != 0 {
        return Err(failed(dah::Error::InvalidWidth(width)));
    }

    let shares = mock_shares(width / 2, rng);
    let payloads: Vec<&[u8]> = shares.iter().map(|share| share.data.as_slice()).collect();
    let extend_workers = if threaded { workers } else { 1 };
    let extend = || {
        ExtendedDataSquare::compute_parallel(&payloads, extend_workers)
            .map_err(|e| failed(e.into()))
    };

    let (duration_ns, cost, digest) = match mode {
        BenchMode::Combined => {
            let start = Instant::now();
            let square = extend()?;
            let computed = roots(&square, &shares, workers, threaded);
            let duration_ns = elapsed_ns(start);
            let (header, cost) = computed.into_result_with_cost().map_err(failed)?;
            (duration_ns, cost, Some(header.hash()))
        }
        BenchMode::RootsOnly => {
            let square = extend()?;
            let start = Instant::now();
            let computed = roots(&square, &shares, workers, threaded);
            let duration_ns = elapsed_ns(start);
            let (header, cost) = computed.into_result_with_cost().map_err(failed)?;
            (duration_ns, cost, Some(header.hash()))
        }
        BenchMode::ErasureOnly => {
            let start = Instant::now();
            let square = black_box(extend()?);
            let duration_ns = elapsed_ns(start);
            drop(square);
            (duration_ns, OperationCost::default(), None)
        }
    };

    Ok(BenchmarkSample {
        width,
        workers,
        threaded,
        mode,
        duration_ns,
        cost,
        digest: black_box(digest),
    })
}

fn roots(
    square: &ExtendedDataSquare,
    shares: &[NamespacedShare],
    workers: usize,
    threaded: bool,
) -> CostResult<DataAvailabilityHeader, dah::Error> {
    let computed = if threaded {
        compute_header_parallel(square, shares, workers)
    } else {
        compute_header_single(square, shares)
    };
    black_box(computed)
}

fn elapsed_ns(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX)
}
