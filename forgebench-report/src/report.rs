//! Report Data Structures

use chrono::{DateTime, Utc};
use forgebench_core::ThroughputResult;
use serde::{Deserialize, Serialize};

/// Complete run report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Run metadata: versions, timestamps, machine, configuration.
    pub meta: ReportMeta,
    /// Every individual measurement, in round order.
    pub rounds: Vec<RoundRecord>,
    /// Per-target summaries across all rounds.
    pub targets: Vec<TargetSummary>,
    /// Present for stress-mode runs only.
    pub stress: Option<StressSummary>,
}

/// Report metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Harness version that produced the report.
    pub version: String,
    /// When the run started.
    pub timestamp: DateTime<Utc>,
    /// Machine the run executed on.
    pub system: SystemInfo,
    /// Effective configuration for the run.
    pub config: ReportConfig,
}

/// Effective configuration captured in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Sample values per workload batch.
    pub gen_count: usize,
    /// Mixing rounds per value.
    pub mix_rounds: u32,
    /// Measurement rounds.
    pub rounds: u32,
    /// Warm-up duration in seconds.
    pub warmup_secs: f64,
    /// Telemetry sampling interval in seconds.
    pub sample_interval_secs: f64,
}

/// System information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system family.
    pub os: String,
    /// CPU model string, best effort.
    pub cpu: String,
    /// Logical core count.
    pub cpu_cores: u32,
}

/// One measurement in one round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based measurement round.
    pub round: u32,
    /// Target name ("core_N" or "multicore").
    pub target: String,
    /// Exact operations completed.
    pub ops: u64,
    /// Compute-phase hashrate in operations per second.
    pub hashrate: f64,
    /// Generate phase, seconds.
    pub generate_secs: f64,
    /// Persist phase, seconds.
    pub persist_secs: f64,
    /// Reload phase, seconds.
    pub reload_secs: f64,
    /// Compute phase, seconds.
    pub compute_secs: f64,
}

impl RoundRecord {
    /// Build a record from a runner result.
    pub fn from_result(round: u32, result: &ThroughputResult) -> Self {
        Self {
            round,
            target: result.target.to_string(),
            ops: result.ops,
            hashrate: result.hashrate,
            generate_secs: result.phases.generate.as_secs_f64(),
            persist_secs: result.phases.persist.as_secs_f64(),
            reload_secs: result.phases.reload.as_secs_f64(),
            compute_secs: result.phases.compute.as_secs_f64(),
        }
    }

    /// Full pipeline duration in seconds, disk round-trip included.
    pub fn pipeline_secs(&self) -> f64 {
        self.generate_secs + self.persist_secs + self.reload_secs + self.compute_secs
    }
}

/// Per-target hashrate summary across rounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSummary {
    /// Target name ("core_N" or "multicore").
    pub target: String,
    /// Mean hashrate across rounds.
    pub mean_hps: f64,
    /// Median hashrate across rounds.
    pub median_hps: f64,
}

/// Stress-mode timing summary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StressSummary {
    /// Single-thread wall-clock time, seconds.
    pub single_time: f64,
    /// Multi-core wall-clock time for the same budget, seconds.
    pub multi_time: f64,
    /// `single_time / multi_time`.
    pub speedup: f64,
}

/// Collect system information for report metadata.
pub fn system_info(cpu_cores: u32) -> SystemInfo {
    SystemInfo {
        os: std::env::consts::OS.to_string(),
        cpu: cpu_model_string(),
        cpu_cores,
    }
}

fn cpu_model_string() -> String {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/cpuinfo")
            .ok()
            .and_then(|content| {
                content
                    .lines()
                    .find(|line| line.starts_with("model name"))
                    .and_then(|line| line.split(':').nth(1))
                    .map(|s| s.trim().to_string())
            })
            .unwrap_or_else(|| "Unknown CPU".to_string())
    }

    #[cfg(not(target_os = "linux"))]
    {
        "Unknown CPU".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forgebench_core::{PhaseTimings, Target};
    use std::time::Duration;

    #[test]
    fn round_record_carries_all_phases() {
        let result = ThroughputResult {
            target: Target::Core(2),
            ops: 1000,
            hashrate: 2000.0,
            phases: PhaseTimings {
                generate: Duration::from_millis(10),
                persist: Duration::from_millis(20),
                reload: Duration::from_millis(30),
                compute: Duration::from_millis(500),
            },
        };

        let record = RoundRecord::from_result(1, &result);
        assert_eq!(record.target, "core_2");
        assert_eq!(record.ops, 1000);
        assert!((record.pipeline_secs() - 0.56).abs() < 1e-9);
        assert!((record.compute_secs - 0.5).abs() < 1e-9);
    }

    #[test]
    fn system_info_reports_core_count() {
        let info = system_info(8);
        assert_eq!(info.cpu_cores, 8);
        assert!(!info.os.is_empty());
    }
}
