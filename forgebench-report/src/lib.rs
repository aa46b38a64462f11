#![warn(missing_docs)]
//! ForgeBench Report - Run Artifacts
//!
//! Turns collected throughput results into the artifacts a run leaves
//! behind:
//! - `summary.csv` — per-target mean/median hashrate
//! - `summary.txt` — key:value stress summary (single/multi/speedup)
//! - `report.json` — machine-readable run report
//! - human-readable hashrate strings for the terminal

mod csv;
mod format;
mod json;
mod report;
mod summary;

pub use csv::{generate_analysis_csv, generate_target_csv, AnalysisRow};
pub use format::format_hps;
pub use json::generate_json_report;
pub use report::{
    system_info, ReportConfig, ReportMeta, RoundRecord, RunReport, StressSummary, SystemInfo,
    TargetSummary,
};
pub use summary::{parse_stress_summary, render_stress_summary};

/// Output format selection for the terminal report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable terminal output.
    Human,
    /// JSON with the full report schema.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
