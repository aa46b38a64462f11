//! Run Orchestration
//!
//! Sequences one invocation: warm-up → measurement rounds (per-core pipeline
//! plus the multi-core aggregate) with the telemetry sampler running beside
//! the workload, then summaries. A round that hits a fatal harness error is
//! aborted and reported; the remaining rounds still run.

use crate::config::ResolvedConfig;
use crate::run_dir::RunContext;
use forgebench_core::{run_core, run_multicore, warmup, HarnessError, Target, ThroughputResult};
use forgebench_report::{
    format_hps, generate_json_report, generate_target_csv, render_stress_summary, system_info,
    OutputFormat, ReportConfig, ReportMeta, RoundRecord, RunReport, StressSummary, TargetSummary,
};
use forgebench_stats::{mean, median};
use forgebench_telemetry::{SamplerConfig, TelemetryLog, TelemetrySampler};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Run the hashrate benchmark: warm-up, then `rounds` measurement rounds.
pub fn run_bench(config: &ResolvedConfig) -> anyhow::Result<RunReport> {
    let ctx = RunContext::create(&config.base_dir)?;
    info!(run_dir = %ctx.run_dir.display(), workers = config.workers, "starting benchmark run");

    run_warmup(config)?;

    let log = TelemetryLog::create(&ctx.telemetry_log_path())?;
    let sampler = TelemetrySampler::spawn(log, sampler_config(config, "BENCH"))?;

    let mut records: Vec<RoundRecord> = Vec::new();
    let mut series: HashMap<String, Vec<f64>> = HashMap::new();

    for round in 1..=config.rounds {
        let bar = round_bar(config, round);
        match run_round(config, &ctx, &bar) {
            Ok(results) => {
                for result in &results {
                    series
                        .entry(result.target.to_string())
                        .or_default()
                        .push(result.hashrate);
                    records.push(RoundRecord::from_result(round, result));
                }
                bar.finish_and_clear();
            }
            Err(err) => {
                bar.abandon();
                error!(round, %err, "round aborted");
            }
        }
    }

    let rows = sampler.stop()?;
    info!(rows, "telemetry sampler finished");

    let targets = summarize_targets(config.workers, &series);
    std::fs::write(ctx.summary_csv_path(), generate_target_csv(&targets))?;

    let report = RunReport {
        meta: report_meta(config),
        rounds: records,
        targets,
        stress: None,
    };
    std::fs::write(ctx.report_json_path(), generate_json_report(&report)?)?;

    match config.format {
        OutputFormat::Human => print_bench_report(&ctx, &report),
        OutputFormat::Json => println!("{}", generate_json_report(&report)?),
    }

    Ok(report)
}

/// Run stress mode: one single-thread pass, then the same budget split
/// across all cores, with the telemetry log labeled per phase.
pub fn run_stress(config: &ResolvedConfig) -> anyhow::Result<StressSummary> {
    let ctx = RunContext::create(&config.base_dir)?;
    info!(
        run_dir = %ctx.run_dir.display(),
        iterations = config.stress_iterations,
        "starting stress run"
    );

    run_warmup(config)?;
    let log_path = ctx.telemetry_log_path();

    let sampler = TelemetrySampler::spawn(
        TelemetryLog::create(&log_path)?,
        sampler_config(config, "SINGLE"),
    )?;
    let start = Instant::now();
    forgebench_core::stress_pass(config.stress_iterations);
    let single_time = start.elapsed().as_secs_f64();
    sampler.stop()?;

    let sampler = TelemetrySampler::spawn(
        TelemetryLog::open_append(&log_path)?,
        sampler_config(config, "MULTI"),
    )?;
    let start = Instant::now();
    forgebench_core::stress_parallel(config.stress_iterations, config.workers)?;
    let multi_time = start.elapsed().as_secs_f64();
    sampler.stop()?;

    let summary = StressSummary {
        single_time,
        multi_time,
        speedup: single_time / multi_time,
    };
    std::fs::write(ctx.stress_summary_path(), render_stress_summary(&summary))?;
    crate::analyze::analyze_runs(&config.base_dir)?;

    println!("Single-thread: {single_time:.2}s");
    println!("Multi-core  : {multi_time:.2}s");
    println!("Speedup     : {:.2}x", summary.speedup);

    Ok(summary)
}

/// One measurement round: every core's pipeline, then the aggregate.
fn run_round(
    config: &ResolvedConfig,
    ctx: &RunContext,
    bar: &ProgressBar,
) -> Result<Vec<ThroughputResult>, HarnessError> {
    let mut results = Vec::with_capacity(config.workers + 1);
    for core in 0..config.workers {
        results.push(run_core(core, &ctx.run_dir, &config.params)?);
        bar.inc(1);
    }
    results.push(run_multicore(&config.params, config.workers)?);
    bar.inc(1);
    Ok(results)
}

fn run_warmup(config: &ResolvedConfig) -> Result<(), HarnessError> {
    if config.warmup.is_zero() {
        return Ok(());
    }
    let bar = ProgressBar::new_spinner().with_message(format!(
        "warming up {} cores for {:.0}s",
        config.workers,
        config.warmup.as_secs_f64()
    ));
    bar.enable_steady_tick(Duration::from_millis(120));
    warmup(config.warmup, config.workers, config.params.mix_rounds)?;
    bar.finish_with_message("warm-up complete");
    Ok(())
}

fn sampler_config(config: &ResolvedConfig, mode: &str) -> SamplerConfig {
    SamplerConfig {
        interval: config.sample_interval,
        mode: mode.to_string(),
        battery_capacity_wh: config.battery_capacity_wh,
    }
}

fn round_bar(config: &ResolvedConfig, round: u32) -> ProgressBar {
    let bar = ProgressBar::new(config.workers as u64 + 1);
    bar.set_style(
        ProgressStyle::with_template("{msg} [{bar:30}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message(format!("round {round}/{}", config.rounds));
    bar
}

/// Collapse the per-round series into per-target summaries, cores first in
/// index order, the aggregate last.
fn summarize_targets(workers: usize, series: &HashMap<String, Vec<f64>>) -> Vec<TargetSummary> {
    let mut targets = Vec::with_capacity(workers + 1);
    let names = (0..workers)
        .map(|core| Target::Core(core).to_string())
        .chain(std::iter::once(Target::Aggregate.to_string()));
    for name in names {
        if let Some(samples) = series.get(&name) {
            targets.push(TargetSummary {
                target: name,
                mean_hps: mean(samples),
                median_hps: median(samples),
            });
        }
    }
    targets
}

fn report_meta(config: &ResolvedConfig) -> ReportMeta {
    ReportMeta {
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        system: system_info(config.workers as u32),
        config: ReportConfig {
            gen_count: config.params.gen_count,
            mix_rounds: config.params.mix_rounds,
            rounds: config.rounds,
            warmup_secs: config.warmup.as_secs_f64(),
            sample_interval_secs: config.sample_interval.as_secs_f64(),
        },
    }
}

fn print_bench_report(ctx: &RunContext, report: &RunReport) {
    println!("Run directory: {}", ctx.run_dir.display());
    for target in &report.targets {
        println!(
            "{:<12} {:>16}  (median {})",
            target.target,
            format_hps(target.mean_hps),
            format_hps(target.median_hps)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forgebench_core::WorkloadParams;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn tiny_config(base_dir: PathBuf) -> ResolvedConfig {
        ResolvedConfig {
            params: WorkloadParams {
                gen_count: 400,
                mix_rounds: 4,
            },
            rounds: 2,
            warmup: Duration::from_millis(30),
            sample_interval: Duration::from_millis(20),
            battery_capacity_wh: 50.0,
            stress_iterations: 5_000,
            workers: 2,
            base_dir,
            format: OutputFormat::Human,
        }
    }

    #[test]
    fn bench_run_produces_all_artifacts() {
        let base = tempfile::tempdir().unwrap();
        let config = tiny_config(base.path().to_path_buf());

        let report = run_bench(&config).unwrap();

        // 2 rounds × (2 cores + multicore)
        assert_eq!(report.rounds.len(), 6);
        // core_0, core_1, multicore
        assert_eq!(report.targets.len(), 3);
        assert_eq!(report.targets.last().unwrap().target, "multicore");

        let run_dir = base.path().join("run1");
        assert!(run_dir.join("summary.csv").exists());
        assert!(run_dir.join("report.json").exists());
        assert!(run_dir.join("telemetry.csv").exists());
        // Scratch files never outlive the run.
        assert!(!run_dir.join("core_0.txt").exists());
        assert!(!run_dir.join("core_1.txt").exists());
    }

    #[test]
    fn stress_run_writes_summary_and_analysis() {
        let base = tempfile::tempdir().unwrap();
        let mut config = tiny_config(base.path().to_path_buf());
        config.warmup = Duration::ZERO;

        let summary = run_stress(&config).unwrap();

        assert!(summary.single_time > 0.0);
        assert!(summary.multi_time > 0.0);
        let contents = std::fs::read_to_string(base.path().join("run1/summary.txt")).unwrap();
        assert!(contents.contains("single_time:"));
        assert!(contents.contains("speedup:"));
        assert!(base.path().join("analysis/summary.csv").exists());
    }

    #[test]
    fn summaries_keep_core_order_and_aggregate_last() {
        let mut series = HashMap::new();
        series.insert("core_0".to_string(), vec![100.0, 200.0]);
        series.insert("core_1".to_string(), vec![50.0]);
        series.insert("multicore".to_string(), vec![400.0]);

        let targets = summarize_targets(2, &series);

        assert_eq!(targets[0].target, "core_0");
        assert_eq!(targets[0].mean_hps, 150.0);
        assert_eq!(targets[1].target, "core_1");
        assert_eq!(targets[2].target, "multicore");
    }
}
