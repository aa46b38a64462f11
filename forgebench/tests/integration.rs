//! End-to-end harness tests: a miniature benchmark run and a miniature
//! stress run against a temporary base directory, checking the artifacts a
//! real invocation would leave behind.

use forgebench::{
    run_bench, run_stress, OutputFormat, ResolvedConfig, RunReport, WorkloadParams,
};
use std::path::PathBuf;
use std::time::Duration;

fn tiny_config(base_dir: PathBuf) -> ResolvedConfig {
    ResolvedConfig {
        params: WorkloadParams {
            gen_count: 300,
            mix_rounds: 4,
        },
        rounds: 2,
        warmup: Duration::from_millis(40),
        sample_interval: Duration::from_millis(25),
        battery_capacity_wh: 50.0,
        stress_iterations: 4_000,
        workers: 2,
        base_dir,
        format: OutputFormat::Human,
    }
}

#[test]
fn benchmark_run_end_to_end() {
    let base = tempfile::tempdir().unwrap();
    let config = tiny_config(base.path().to_path_buf());

    let report = run_bench(&config).unwrap();

    // Every round measured every core plus the aggregate.
    assert_eq!(report.rounds.len(), (config.workers + 1) * 2);
    for record in &report.rounds {
        if record.target != "multicore" {
            assert_eq!(record.ops, config.params.gen_count as u64);
        }
        assert!(record.hashrate > 0.0);
        assert!(record.pipeline_secs() >= record.compute_secs);
    }

    // The multicore aggregate covers workers x batch.
    let aggregate = report
        .rounds
        .iter()
        .find(|r| r.target == "multicore")
        .unwrap();
    assert_eq!(
        aggregate.ops,
        (config.workers * config.params.gen_count) as u64
    );

    let run_dir = base.path().join("run1");

    // summary.csv carries one row per target under a header.
    let summary = std::fs::read_to_string(run_dir.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines[0], "Target,Mean H/s,Median H/s");
    assert_eq!(lines.len(), 1 + config.workers + 1);
    assert!(lines[1].starts_with("core_0,"));
    assert!(lines.last().unwrap().starts_with("multicore,"));

    // report.json parses back into the report schema.
    let json = std::fs::read_to_string(run_dir.join("report.json")).unwrap();
    let parsed: RunReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.targets.len(), config.workers + 1);
    assert!(parsed.stress.is_none());

    // The telemetry log is finalized and time-ordered.
    let telemetry = std::fs::read_to_string(run_dir.join("telemetry.csv")).unwrap();
    let mut rows = telemetry.lines();
    assert_eq!(
        rows.next().unwrap(),
        "time,mode,cpu_total,avg_freq_mhz,temperature_c,power_w"
    );
    let times: Vec<f64> = rows
        .map(|l| l.split(',').next().unwrap().parse().unwrap())
        .collect();
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn consecutive_runs_get_fresh_directories() {
    let base = tempfile::tempdir().unwrap();
    let mut config = tiny_config(base.path().to_path_buf());
    config.rounds = 1;
    config.warmup = Duration::ZERO;

    run_bench(&config).unwrap();
    run_bench(&config).unwrap();

    assert!(base.path().join("run1/summary.csv").exists());
    assert!(base.path().join("run2/summary.csv").exists());
}

#[test]
fn stress_run_end_to_end() {
    let base = tempfile::tempdir().unwrap();
    let mut config = tiny_config(base.path().to_path_buf());
    config.warmup = Duration::ZERO;

    let summary = run_stress(&config).unwrap();
    assert!(summary.single_time > 0.0);
    assert!(summary.multi_time > 0.0);
    assert!(summary.speedup > 0.0);

    // The telemetry log covers both phases in order: SINGLE rows first,
    // MULTI rows after, one header total.
    let telemetry = std::fs::read_to_string(base.path().join("run1/telemetry.csv")).unwrap();
    let modes: Vec<&str> = telemetry
        .lines()
        .skip(1)
        .map(|l| l.split(',').nth(1).unwrap())
        .collect();
    if let Some(first_multi) = modes.iter().position(|m| *m == "MULTI") {
        assert!(modes[..first_multi].iter().all(|m| *m == "SINGLE"));
        assert!(modes[first_multi..].iter().all(|m| *m == "MULTI"));
    }

    // Cross-run analysis picked the summary up.
    let analysis = std::fs::read_to_string(base.path().join("analysis/summary.csv")).unwrap();
    assert!(analysis.contains("single_thread_time"));
    assert!(analysis.contains("speedup"));
}
