//! Cross-Run Analysis
//!
//! Aggregates the stress summaries of every completed run under the base
//! directory into `analysis/summary.csv`.

use forgebench_report::{generate_analysis_csv, parse_stress_summary, AnalysisRow};
use forgebench_stats::{mean, median};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Recompute `analysis/summary.csv` from all `run*/summary.txt` files.
///
/// Returns the path of the written file, or `None` when no run has a stress
/// summary yet.
pub fn analyze_runs(base_dir: &Path) -> anyhow::Result<Option<PathBuf>> {
    let mut single_times = Vec::new();
    let mut multi_times = Vec::new();
    let mut speedups = Vec::new();

    for entry in fs::read_dir(base_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if !name.to_string_lossy().starts_with("run") {
            continue;
        }
        let summary_path = entry.path().join("summary.txt");
        let Ok(contents) = fs::read_to_string(&summary_path) else {
            continue;
        };
        let Some(summary) = parse_stress_summary(&contents) else {
            debug!(path = %summary_path.display(), "skipping unparsable stress summary");
            continue;
        };
        single_times.push(summary.single_time);
        multi_times.push(summary.multi_time);
        speedups.push(summary.speedup);
    }

    if single_times.is_empty() {
        return Ok(None);
    }

    let rows = vec![
        AnalysisRow {
            metric: "single_thread_time".to_string(),
            average: mean(&single_times),
            median: median(&single_times),
        },
        AnalysisRow {
            metric: "multi_thread_time".to_string(),
            average: mean(&multi_times),
            median: median(&multi_times),
        },
        AnalysisRow {
            metric: "speedup".to_string(),
            average: mean(&speedups),
            median: median(&speedups),
        },
    ];

    let analysis_dir = base_dir.join("analysis");
    fs::create_dir_all(&analysis_dir)?;
    let path = analysis_dir.join("summary.csv");
    fs::write(&path, generate_analysis_csv(&rows))?;
    Ok(Some(path))
}
