//! JSON Report Output

use crate::report::RunReport;

/// Serialize the full run report as pretty-printed JSON.
pub fn generate_json_report(report: &RunReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ReportConfig, ReportMeta, StressSummary, SystemInfo, TargetSummary};

    fn minimal_report() -> RunReport {
        RunReport {
            meta: ReportMeta {
                version: "0.3.1".to_string(),
                timestamp: chrono::Utc::now(),
                system: SystemInfo {
                    os: "linux".to_string(),
                    cpu: "Test CPU".to_string(),
                    cpu_cores: 4,
                },
                config: ReportConfig {
                    gen_count: 1000,
                    mix_rounds: 32,
                    rounds: 3,
                    warmup_secs: 15.0,
                    sample_interval_secs: 1.0,
                },
            },
            rounds: Vec::new(),
            targets: vec![TargetSummary {
                target: "core_0".to_string(),
                mean_hps: 1e6,
                median_hps: 1e6,
            }],
            stress: Some(StressSummary {
                single_time: 10.0,
                multi_time: 2.5,
                speedup: 4.0,
            }),
        }
    }

    #[test]
    fn report_serializes_and_parses_back() {
        let json = generate_json_report(&minimal_report()).unwrap();
        let parsed: RunReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.meta.system.cpu_cores, 4);
        assert_eq!(parsed.targets[0].target, "core_0");
        assert_eq!(parsed.stress.unwrap().speedup, 4.0);
    }
}
