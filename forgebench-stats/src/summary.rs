//! Series Summaries

use crate::percentiles::compute_percentile;

/// Summary of one hashrate series (one target across measurement rounds).
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Interpolated median.
    pub median: f64,
    /// Sample standard deviation (0.0 below two samples).
    pub std_dev: f64,
    /// Smallest observation.
    pub min: f64,
    /// Largest observation.
    pub max: f64,
    /// Number of observations.
    pub sample_count: usize,
}

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Interpolated median; 0.0 for an empty slice.
pub fn median(samples: &[f64]) -> f64 {
    compute_percentile(samples, 50.0)
}

/// Compute the full summary for one series.
pub fn compute_summary(samples: &[f64]) -> SeriesSummary {
    let mean_value = mean(samples);

    let std_dev = if samples.len() < 2 {
        0.0
    } else {
        let variance = samples
            .iter()
            .map(|x| (x - mean_value).powi(2))
            .sum::<f64>()
            / (samples.len() - 1) as f64;
        variance.sqrt()
    };

    let min = samples
        .iter()
        .cloned()
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(0.0);
    let max = samples
        .iter()
        .cloned()
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(0.0);

    SeriesSummary {
        mean: mean_value,
        median: median(samples),
        std_dev,
        min,
        max,
        sample_count: samples.len(),
    }
}
