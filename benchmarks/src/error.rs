use thiserror::Error;

/// Errors from running or summarizing benchmarks.
#[derive(Debug, Error)]
pub enum BenchError {
    /// Statistics were requested over no samples.
    #[error("cannot aggregate an empty sample set")]
    EmptySamples,
    /// The sweep configuration is unusable.
    #[error("invalid sweep configuration: {0}")]
    InvalidConfig(String),
    /// A configuration file could not be read.
    #[error("could not read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// A trial failed; the configuration it belonged to is abandoned.
    #[error("trial at width {width} with {workers} workers failed")]
    Trial {
        /// Extended width of the failed trial.
        width: usize,
        /// Worker count of the failed trial.
        workers: usize,
        /// Underlying failure.
        #[source]
        source: dah::Error,
    },
}
