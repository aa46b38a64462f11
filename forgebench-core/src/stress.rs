//! Random-Product Stress Workload
//!
//! A pure CPU-saturation variant used by stress mode: multiply random 64-bit
//! pairs for a fixed iteration budget. Deliberately non-reproducible, and
//! never reported as a hashrate — it exists to pull every core to 100% while
//! the telemetry sampler watches, not to measure throughput.

use crate::HarnessError;
use rand::Rng;
use std::thread;
use tracing::debug;

/// Run `iterations` random products on the calling thread.
pub fn stress_pass(iterations: u64) {
    let mut rng = rand::thread_rng();
    for _ in 0..iterations {
        let a: u64 = rng.gen();
        let b: u64 = rng.gen();
        std::hint::black_box(a.wrapping_mul(b));
    }
}

/// Split `iterations` across `workers` threads and block until all finish.
///
/// The last worker absorbs the division remainder so the total is exact.
pub fn stress_parallel(iterations: u64, workers: usize) -> Result<(), HarnessError> {
    let workers = workers.max(1) as u64;
    let chunk = iterations / workers;

    let mut handles = Vec::with_capacity(workers as usize);
    for worker in 0..workers {
        let share = if worker == workers - 1 {
            iterations - chunk * (workers - 1)
        } else {
            chunk
        };
        let handle = thread::Builder::new()
            .name(format!("forge-stress-{worker}"))
            .spawn(move || stress_pass(share))
            .map_err(|e| HarnessError::io("spawn", e))?;
        handles.push(handle);
    }

    for (worker, handle) in handles.into_iter().enumerate() {
        handle
            .join()
            .map_err(|_| HarnessError::WorkerCrash { worker })?;
    }
    debug!(iterations, workers, "stress pass complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_split_completes() {
        // Small budget; the point is the spawn/join lifecycle, not load.
        stress_parallel(10_000, 3).unwrap();
    }

    #[test]
    fn uneven_split_still_completes() {
        stress_parallel(10_001, 4).unwrap();
    }

    #[test]
    fn single_worker_handles_whole_budget() {
        stress_parallel(5_000, 1).unwrap();
    }
}
