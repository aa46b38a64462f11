//! CSV Summaries

use crate::report::TargetSummary;

/// Render the per-target benchmark summary (`summary.csv`).
pub fn generate_target_csv(targets: &[TargetSummary]) -> String {
    let mut out = String::from("Target,Mean H/s,Median H/s\n");
    for target in targets {
        out.push_str(&format!(
            "{},{:.3},{:.3}\n",
            target.target, target.mean_hps, target.median_hps
        ));
    }
    out
}

/// One metric row of the cross-run analysis CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRow {
    /// Metric name (e.g. "single_thread_time").
    pub metric: String,
    /// Mean across runs.
    pub average: f64,
    /// Median across runs.
    pub median: f64,
}

/// Render the cross-run analysis summary (`analysis/summary.csv`).
pub fn generate_analysis_csv(rows: &[AnalysisRow]) -> String {
    let mut out = String::from("metric,average,median\n");
    for row in rows {
        out.push_str(&format!(
            "{},{:.6},{:.6}\n",
            row.metric, row.average, row.median
        ));
    }
    out
}
