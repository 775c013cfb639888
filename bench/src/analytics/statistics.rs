use crate::error::BenchError;

/// Percentiles reported in the distribution table, the last one is always the maximum.
pub const PERCENTILES: [u8; 9] = [50, 66, 75, 80, 90, 95, 98, 99, 100];

/// Five-number summary of one request phase, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseStatistics {
    pub min: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub median: f64,
    pub max: f64,
}

/// Zero-based nearest-rank index: `floor(p / 100 * n)` clamped to the last element.
pub fn nearest_rank_index(percentile: u8, len: usize) -> usize {
    if percentile >= 100 {
        return len.saturating_sub(1);
    }
    (percentile as usize * len / 100).min(len.saturating_sub(1))
}

/// Nearest-rank distribution over already sorted samples, no interpolation.
pub fn percentile_distribution(sorted: &[f64]) -> Result<Vec<(u8, f64)>, BenchError> {
    let Some(&longest) = sorted.last() else {
        return Err(BenchError::EmptyResultSet);
    };

    Ok(PERCENTILES
        .iter()
        .map(|&percentile| match percentile {
            100 => (percentile, longest),
            _ => (
                percentile,
                sorted[nearest_rank_index(percentile, sorted.len())],
            ),
        })
        .collect())
}

pub fn mean(values: &[f64]) -> Result<f64, BenchError> {
    if values.is_empty() {
        return Err(BenchError::EmptyResultSet);
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Bessel-corrected standard deviation, defined as exactly 0 for a single sample.
pub fn sample_std_deviation(values: &[f64]) -> Result<f64, BenchError> {
    let mean = mean(values)?;
    if values.len() == 1 {
        return Ok(0.0);
    }
    let squares = values
        .iter()
        .map(|value| (value - mean) * (value - mean))
        .sum::<f64>();
    Ok((squares / (values.len() - 1) as f64).sqrt())
}

/// Element at index `n / 2` of the sorted samples. For an even count this is the upper
/// of the two middle values; they are not averaged.
pub fn upper_median(sorted: &[f64]) -> Result<f64, BenchError> {
    sorted
        .get(sorted.len() / 2)
        .copied()
        .ok_or(BenchError::EmptyResultSet)
}

pub fn sort_samples(values: &mut [f64]) {
    values.sort_by(|a, b| a.total_cmp(b));
}

pub fn summarize(values: &[f64]) -> Result<PhaseStatistics, BenchError> {
    let mut sorted = values.to_vec();
    sort_samples(&mut sorted);
    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return Err(BenchError::EmptyResultSet);
    };

    Ok(PhaseStatistics {
        min,
        mean: mean(&sorted)?,
        std_dev: sample_std_deviation(&sorted)?,
        median: upper_median(&sorted)?,
        max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn should_index_nearest_rank_without_interpolation() {
        assert_eq!(nearest_rank_index(50, 5), 2);
        assert_eq!(nearest_rank_index(66, 5), 3);
        assert_eq!(nearest_rank_index(99, 5), 4);
        assert_eq!(nearest_rank_index(50, 1), 0);
        assert_eq!(nearest_rank_index(100, 7), 6);
    }

    #[test]
    fn should_clamp_index_to_last_sample() {
        assert_eq!(nearest_rank_index(99, 1), 0);
        assert_eq!(nearest_rank_index(98, 2), 1);
    }

    #[test]
    fn should_report_maximum_as_longest_request() {
        let sorted = [0.10, 0.12, 0.15, 0.20, 0.30];

        let distribution = percentile_distribution(&sorted).unwrap();

        assert_eq!(distribution.len(), PERCENTILES.len());
        assert_eq!(distribution[0], (50, 0.15));
        assert_eq!(distribution.last(), Some(&(100, 0.30)));
    }

    #[test]
    fn should_define_single_sample_deviation_as_zero() {
        assert_eq!(sample_std_deviation(&[0.42]).unwrap(), 0.0);
    }

    #[test]
    fn should_use_bessel_correction() {
        let deviation = sample_std_deviation(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();

        // Population deviation of this set is 2.0, the sample one is sqrt(32 / 7).
        assert!((deviation - (32.0_f64 / 7.0).sqrt()).abs() < EPSILON);
    }

    #[test]
    fn should_take_upper_middle_as_median_for_even_count() {
        assert_eq!(upper_median(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 3.0);
        assert_eq!(upper_median(&[1.0, 2.0, 3.0]).unwrap(), 2.0);
    }

    #[test]
    fn should_summarize_unsorted_phase_samples() {
        let summary = summarize(&[0.30, 0.10, 0.20, 0.15, 0.12]).unwrap();

        assert_eq!(summary.min, 0.10);
        assert_eq!(summary.max, 0.30);
        assert_eq!(summary.median, 0.15);
        assert!((summary.mean - 0.174).abs() < EPSILON);
    }

    #[test]
    fn should_signal_empty_sample_set() {
        assert!(matches!(mean(&[]), Err(BenchError::EmptyResultSet)));
        assert!(matches!(
            sample_std_deviation(&[]),
            Err(BenchError::EmptyResultSet)
        ));
        assert!(matches!(upper_median(&[]), Err(BenchError::EmptyResultSet)));
        assert!(matches!(
            percentile_distribution(&[]),
            Err(BenchError::EmptyResultSet)
        ));
        assert!(matches!(summarize(&[]), Err(BenchError::EmptyResultSet)));
    }
}
