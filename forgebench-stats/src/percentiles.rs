//! Percentile Computation

/// Compute a single percentile from samples.
///
/// Uses linear interpolation between nearest ranks. Returns 0.0 for an empty
/// slice.
pub fn compute_percentile(samples: &[f64], percentile: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    if samples.len() == 1 {
        return samples[0];
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let p = percentile / 100.0;

    // Linear interpolation between nearest ranks
    let rank = p * (n - 1) as f64;
    let lower_idx = rank.floor() as usize;
    let upper_idx = (lower_idx + 1).min(n - 1);
    let fraction = rank - lower_idx as f64;

    sorted[lower_idx] + fraction * (sorted[upper_idx] - sorted[lower_idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let p50 = compute_percentile(&samples, 50.0);
        assert!((p50 - 3.0).abs() < 0.01);
    }

    #[test]
    fn test_even_length_median_interpolates() {
        let samples = vec![1.0, 2.0, 3.0, 4.0];
        let p50 = compute_percentile(&samples, 50.0);
        assert!((p50 - 2.5).abs() < 0.01);
    }

    #[test]
    fn test_unsorted_input() {
        let samples = vec![5.0, 1.0, 4.0, 2.0, 3.0];
        let p50 = compute_percentile(&samples, 50.0);
        assert!((p50 - 3.0).abs() < 0.01);
    }

    #[test]
    fn test_single_sample() {
        let samples = vec![42.0];
        let p50 = compute_percentile(&samples, 50.0);
        assert!((p50 - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_samples() {
        let samples: Vec<f64> = Vec::new();
        let p50 = compute_percentile(&samples, 50.0);
        assert!((p50 - 0.0).abs() < f64::EPSILON);
    }
}
