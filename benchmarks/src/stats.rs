use crate::BenchError;

/// Summary of a set of durations, in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    /// Arithmetic mean.
    pub mean_ns: f64,
    /// Population standard deviation.
    pub std_dev_ns: f64,
    /// Number of durations summarized.
    pub count: usize,
}

/// Mean and population standard deviation of `durations_ns`.
pub fn aggregate(durations_ns: &[u64]) -> Result<Aggregate, BenchError> {
    if durations_ns.is_empty() {
        return Err(BenchError::EmptySamples);
    }
    let count = durations_ns.len() as f64;
    let mean_ns = durations_ns.iter().map(|&d| d as f64).sum::<f64>() / count;
    let variance = durations_ns
        .iter()
        .map(|&d| {
            let delta = d as f64 - mean_ns;
            delta * delta
        })
        .sum::<f64>()
        / count;

    Ok(Aggregate {
        mean_ns,
        std_dev_ns: variance.sqrt(),
        count: durations_ns.len(),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn population_deviation() {
        let summary = aggregate(&[10, 20, 30]).expect("non-empty");
        assert_eq!(summary.count, 3);
        assert!((summary.mean_ns - 20.0).abs() < 1e-9);
        assert!((summary.std_dev_ns - 8.164_965_8).abs() < 1e-6);
    }

    #[test]
    fn single_sample_has_no_spread() {
        let summary = aggregate(&[1_234]).unwrap();
        assert_eq!(summary.mean_ns, 1_234.0);
        assert_eq!(summary.std_dev_ns, 0.0);
    }

    #[test]
    fn constant_samples_have_no_spread() {
        let summary = aggregate(&[7; 20]).unwrap();
        assert_eq!(summary.mean_ns, 7.0);
        assert_eq!(summary.std_dev_ns, 0.0);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_matches!(aggregate(&[]), Err(BenchError::EmptySamples));
    }
}
