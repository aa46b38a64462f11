//! Per-Core Pipeline Runner
//!
//! Executes the full generate → persist → reload → compute pipeline on one
//! pinned logical core, timing each phase separately so storage overhead and
//! pure compute throughput stay distinguishable in the report.

use crate::measure::{pin_to_cpu, PhaseTimer};
use crate::scratch::{persist_batch, reload_batch};
use crate::{generate, mix, HarnessError, PhaseTimings, Target, ThroughputResult, WorkloadParams};
use std::path::Path;
use tracing::{debug, warn};

/// Run the pipeline for one logical core.
///
/// `scratch_dir` is the run directory that owns the per-core scratch file;
/// the file is created and deleted within this call. Affinity failures are
/// non-fatal (the run proceeds unpinned); I/O and reload failures abort this
/// invocation only.
pub fn run_core(
    core_id: usize,
    scratch_dir: &Path,
    params: &WorkloadParams,
) -> Result<ThroughputResult, HarnessError> {
    if let Err(err) = pin_to_cpu(core_id) {
        warn!(core = core_id, %err, "affinity pinning unavailable, running unpinned");
    }

    let mut timer = PhaseTimer::start();

    let batch = generate(params.gen_count);
    let generate_phase = timer.lap();

    let scratch_path = scratch_dir.join(format!("core_{core_id}.txt"));
    persist_batch(&scratch_path, &batch)?;
    let persist_phase = timer.lap();

    let reloaded = reload_batch(&scratch_path)?;
    let reload_phase = timer.lap();

    let mut ops = 0u64;
    for &value in &reloaded {
        std::hint::black_box(mix(value, params.mix_rounds));
        ops += 1;
    }
    let compute_phase = timer.lap();

    let phases = PhaseTimings {
        generate: generate_phase,
        persist: persist_phase,
        reload: reload_phase,
        compute: compute_phase,
    };
    debug!(
        core = core_id,
        ops,
        compute_secs = phases.compute.as_secs_f64(),
        pipeline_secs = phases.pipeline().as_secs_f64(),
        "per-core pipeline complete"
    );

    Ok(ThroughputResult {
        target: Target::Core(core_id),
        ops,
        hashrate: ops as f64 / phases.compute.as_secs_f64(),
        phases,
    })
}
