//! Global Warm-up Synchronizer
//!
//! Saturates every logical core simultaneously until one shared absolute
//! deadline so the CPU reaches thermal and frequency steady state before any
//! measurement starts. The deadline is computed once, before spawning, and
//! copied into every worker: a slow-starting worker therefore shortens its
//! own busy window instead of extending everyone else's.

use crate::{mix, HarnessError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

/// How many mixing chains a warm-up worker runs between deadline checks.
/// Small enough that all workers stop within microseconds of each other.
const CHAINS_PER_POLL: u32 = 64;

/// Saturate `workers` cores with the mixing function for `duration`.
///
/// Blocks until every worker has observed the deadline and exited.
pub fn warmup(duration: Duration, workers: usize, mix_rounds: u32) -> Result<(), HarnessError> {
    let workers = workers.max(1);
    let deadline = Instant::now() + duration;

    let mut handles = Vec::with_capacity(workers);
    for worker in 0..workers {
        let handle = thread::Builder::new()
            .name(format!("forge-warmup-{worker}"))
            .spawn(move || {
                let mut x = 123456789u64.wrapping_add(worker as u64);
                while Instant::now() < deadline {
                    for _ in 0..CHAINS_PER_POLL {
                        x = mix(x, mix_rounds);
                    }
                }
                std::hint::black_box(x);
            })
            .map_err(|e| HarnessError::io("spawn", e))?;
        handles.push(handle);
    }

    for (worker, handle) in handles.into_iter().enumerate() {
        handle
            .join()
            .map_err(|_| HarnessError::WorkerCrash { worker })?;
    }
    debug!(workers, secs = duration.as_secs_f64(), "warm-up complete");
    Ok(())
}
