#![warn(missing_docs)]
//! # ForgeBench
//!
//! CPU saturation and hashrate harness with concurrent system telemetry.
//!
//! ForgeBench characterizes raw and sustained compute performance:
//! - **Per-core pipeline**: pinned generate → persist → reload → compute
//!   runs that separate storage overhead from pure compute throughput
//! - **Multi-core aggregate**: one worker per logical core over a shared
//!   batch, measured over a single wall-clock span for a true parallel
//!   speedup figure
//! - **Global warm-up**: every core saturated until one shared deadline so
//!   measurements start from thermal/frequency steady state
//! - **Concurrent telemetry**: utilization, frequency, temperature, and a
//!   battery power estimate sampled beside the workload without perturbing it
//! - **Stress mode**: non-reproducible random-product saturation with a
//!   single-vs-multi speedup summary
//!
//! ## Quick Start
//!
//! ```ignore
//! $ forgebench bench --rounds 3 --warmup 15s
//! $ forgebench stress --iterations 100000000
//! $ forgebench analyze
//! ```

// Re-export the core workload harness
pub use forgebench_core::{
    aggregate_hashrate, generate, generate_with_multiplier, mix, pin_to_cpu, run_core,
    run_multicore, stress_parallel, stress_pass, warmup, HarnessError, PhaseTimer, PhaseTimings,
    Target, ThroughputResult, WorkloadParams, MIX_MULTIPLIER,
};

// Re-export telemetry
pub use forgebench_telemetry::{
    SamplerConfig, TelemetryError, TelemetryLog, TelemetrySample, TelemetrySampler,
};

// Re-export stats
pub use forgebench_stats::{compute_summary, mean, median, SeriesSummary};

// Re-export reporting
pub use forgebench_report::{
    format_hps, OutputFormat, RoundRecord, RunReport, StressSummary, TargetSummary,
};

// Re-export the CLI surface
pub use forgebench_cli::{
    analyze_runs, available_cores, run_bench, run_stress, ForgeConfig, ResolvedConfig, RunContext,
};

/// Run the ForgeBench CLI harness.
///
/// Call this from the binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     forgebench::run()
/// }
/// ```
pub use forgebench_cli::run;
