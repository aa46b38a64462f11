//! Multi-Core Coordinator
//!
//! Fans one shared read-only batch out to one worker per logical core. Each
//! worker mixes the entire batch and hands back its completed-operation count
//! through its join handle — a slot written exactly once at completion, read
//! only after the join barrier, so no synchronization sits on the measured
//! path. The aggregate hashrate divides the summed counts by the single
//! wall-clock span that enclosed all workers, which is what makes the figure
//! a true parallel-speedup measurement rather than a sum of sequential runs.

use crate::measure::PhaseTimer;
use crate::{generate, mix, HarnessError, PhaseTimings, Target, ThroughputResult, WorkloadParams};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::debug;

/// Aggregate hashrate across workers: summed completed operations over the
/// one wall-clock span that covered all of them.
pub fn aggregate_hashrate(counts: &[u64], span: Duration) -> f64 {
    counts.iter().sum::<u64>() as f64 / span.as_secs_f64()
}

/// Mix the whole batch, returning the exact number of completed operations.
fn mix_batch(batch: &[u64], rounds: u32) -> u64 {
    let mut completed = 0u64;
    for &value in batch {
        std::hint::black_box(mix(value, rounds));
        completed += 1;
    }
    completed
}

/// Join every worker, collecting the write-once counts in spawn order.
///
/// All handles are joined even when one crashes; the first crash is then
/// surfaced as [`HarnessError::WorkerCrash`] instead of being silently
/// counted as zero throughput.
fn collect_counts(handles: Vec<JoinHandle<u64>>) -> Result<Vec<u64>, HarnessError> {
    let mut counts = Vec::with_capacity(handles.len());
    let mut crashed = None;
    for (worker, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(count) => counts.push(count),
            Err(_) => crashed = crashed.or(Some(worker)),
        }
    }
    match crashed {
        Some(worker) => Err(HarnessError::WorkerCrash { worker }),
        None => Ok(counts),
    }
}

/// Run the shared batch on `workers` parallel workers and report the
/// aggregate throughput.
pub fn run_multicore(
    params: &WorkloadParams,
    workers: usize,
) -> Result<ThroughputResult, HarnessError> {
    let workers = workers.max(1);

    let mut timer = PhaseTimer::start();
    let batch: Arc<[u64]> = generate(params.gen_count).into();
    let generate_phase = timer.lap();

    let rounds = params.mix_rounds;
    let span_start = Instant::now();
    let mut handles = Vec::with_capacity(workers);
    for worker in 0..workers {
        let batch = Arc::clone(&batch);
        let handle = thread::Builder::new()
            .name(format!("forge-worker-{worker}"))
            .spawn(move || mix_batch(&batch, rounds))
            .map_err(|e| HarnessError::io("spawn", e))?;
        handles.push(handle);
    }

    let counts = collect_counts(handles)?;
    let span = span_start.elapsed();

    let ops: u64 = counts.iter().sum();
    debug!(
        workers,
        ops,
        span_secs = span.as_secs_f64(),
        "multicore span complete"
    );

    Ok(ThroughputResult {
        target: Target::Aggregate,
        ops,
        hashrate: aggregate_hashrate(&counts, span),
        phases: PhaseTimings {
            generate: generate_phase,
            compute: span,
            ..PhaseTimings::default()
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_is_sum_over_single_span() {
        // Four workers reporting [10, 20, 30, 40] over a 2.0s measured span.
        let counts = [10u64, 20, 30, 40];
        let rate = aggregate_hashrate(&counts, Duration::from_secs(2));
        assert_eq!(rate, 50.0);
    }

    #[test]
    fn every_worker_covers_the_whole_batch() {
        let params = WorkloadParams {
            gen_count: 1500,
            mix_rounds: 4,
        };

        let result = run_multicore(&params, 3).unwrap();

        assert_eq!(result.target, Target::Aggregate);
        assert_eq!(result.ops, 3 * 1500);
        assert!(result.hashrate > 0.0);
        assert_eq!(
            result.hashrate,
            result.ops as f64 / result.phases.compute.as_secs_f64()
        );
    }

    #[test]
    fn zero_workers_degrades_to_one() {
        let params = WorkloadParams {
            gen_count: 100,
            mix_rounds: 1,
        };
        let result = run_multicore(&params, 0).unwrap();
        assert_eq!(result.ops, 100);
    }

    #[test]
    fn crashed_worker_is_not_zero_throughput() {
        let healthy = thread::spawn(|| 100u64);
        let crashing = thread::spawn(|| -> u64 { panic!("worker died") });

        let err = collect_counts(vec![healthy, crashing]).unwrap_err();
        assert!(matches!(err, HarnessError::WorkerCrash { worker: 1 }));
    }

    #[test]
    fn counts_preserve_spawn_order() {
        let handles = vec![thread::spawn(|| 1u64), thread::spawn(|| 2u64)];
        assert_eq!(collect_counts(handles).unwrap(), vec![1, 2]);
    }
}
