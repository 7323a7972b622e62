//! Timing sweeps for data availability header computation.
//!
//! A sweep runs a fixed number of trials for every (worker count, width)
//! pair, each on freshly generated random data, and reduces the measured
//! durations to a mean and population standard deviation.

#![warn(missing_docs)]

mod config;
mod error;
mod stats;
mod sweep;
mod trial;


pub use config::SweepConfig;
pub use error::BenchError;
pub use stats::{aggregate, Aggregate};
pub use sweep::{run_sweep, run_sweep_with, BenchmarkResult, SweepReport};
pub use trial::{run_trial, BenchMode, BenchmarkSample};
