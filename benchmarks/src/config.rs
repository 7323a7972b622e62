use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{BenchError, BenchMode};

/// Parameters of a benchmark sweep.
///
/// Widths are extended widths. Every field has a default, so a TOML file
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// Smallest width measured.
    pub min_width: usize,
    /// Largest width measured, inclusive.
    pub max_width: usize,
    /// Distance between consecutive widths.
    pub width_step: usize,
    /// Worker counts, measured in order.
    pub worker_counts: Vec<usize>,
    /// Trials per configuration.
    pub repetitions: usize,
    /// Stages timed by each trial.
    pub mode: BenchMode,
    /// Seed for share generation; random when absent.
    pub seed: Option<u64>,
    /// Default log filter, used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            min_width: 8,
            max_width: 256,
            width_step: 8,
            worker_counts: (0..=8).map(|shift| 1 << shift).collect(),
            repetitions: 20,
            mode: BenchMode::Combined,
            seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl SweepConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, BenchError> {
        toml::from_str(source).map_err(|e| BenchError::InvalidConfig(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BenchError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Widths covered by the sweep, ascending.
    pub fn widths(&self) -> Vec<usize> {
        (self.min_width..=self.max_width)
            .step_by(self.width_step.max(1))
            .collect()
    }

    /// Reject configurations that cannot produce any valid trial.
    pub fn validate(&self) -> Result<(), BenchError> {
        let invalid = |reason: String| Err(BenchError::InvalidConfig(reason));
        if self.width_step == 0 {
            return invalid("width_step must be positive".to_string());
        }
        if self.min_width > self.max_width {
            return invalid(format!(
                "min_width {} exceeds max_width {}",
                self.min_width, self.max_width
            ));
        }
        if let Some(width) = self.widths().into_iter().find(|w| *w == 0 || w % 2 != 0) {
            return invalid(format!("width {width} must be even and positive"));
        }
        if self.worker_counts.is_empty() {
            return invalid("worker_counts is empty".to_string());
        }
        if self.worker_counts.contains(&0) {
            return invalid("worker counts must be at least 1".to_string());
        }
        if self.repetitions == 0 {
            return invalid("repetitions must be positive".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn default_sweep_shape() {
        let config = SweepConfig::default();
        config.validate().expect("defaults are valid");
        let widths = config.widths();
        assert_eq!(widths.len(), 32);
        assert_eq!(widths.first(), Some(&8));
        assert_eq!(widths.last(), Some(&256));
        assert_eq!(
            config.worker_counts,
            vec![1, 2, 4, 8, 16, 32, 64, 128, 256]
        );
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = SweepConfig::from_toml_str(
            r#"
            max_width = 32
            worker_counts = [1, 3]
            mode = "roots-only"
            seed = 9
            "#,
        )
        .expect("parse");
        assert_eq!(config.widths(), vec![8, 16, 24, 32]);
        assert_eq!(config.worker_counts, vec![1, 3]);
        assert_eq!(config.mode, BenchMode::RootsOnly);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.repetitions, 20);
    }

    #[test]
    fn unknown_keys_rejected() {
        assert_matches!(
            SweepConfig::from_toml_str("threads = 4"),
            Err(BenchError::InvalidConfig(_))
        );
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "repetitions = 3").unwrap();
        let config = SweepConfig::load(file.path()).expect("load");
        assert_eq!(config.repetitions, 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert_matches!(
            SweepConfig::load(dir.path().join("absent.toml")),
            Err(BenchError::Io(_))
        );
    }

    #[test]
    fn invalid_configs_rejected() {
        let odd = SweepConfig {
            min_width: 3,
            max_width: 9,
            width_step: 2,
            ..Default::default()
        };
        let no_workers = SweepConfig {
            worker_counts: vec![],
            ..Default::default()
        };
        let zero_worker = SweepConfig {
            worker_counts: vec![1, 0],
            ..Default::default()
        };
        let no_repetitions = SweepConfig {
            repetitions: 0,
            ..Default::default()
        };
        let reversed = SweepConfig {
            min_width: 16,
            max_width: 8,
            ..Default::default()
        };
        let zero_width = SweepConfig {
            min_width: 0,
            ..Default::default()
        };
        for config in [odd, no_workers, zero_worker, no_repetitions, reversed, zero_width] {
            assert_matches!(config.validate(), Err(BenchError::InvalidConfig(_)));
        }
    }
}
