#![warn(missing_docs)]
//! ForgeBench Core - Workload Execution
//!
//! This crate provides the measured workload and its execution harness:
//! - Deterministic integer-mixing workload (the unit of measured work)
//! - Per-core pinned pipeline runner (generate → persist → reload → compute)
//! - Multi-core coordinator with one worker per logical core
//! - Global warm-up synchronizer with a shared deadline
//! - CPU affinity pinning with graceful degradation

mod error;
mod measure;
mod mix;
mod multicore;
mod runner;
mod scratch;
mod stress;
mod warmup;

pub use error::HarnessError;
pub use measure::{pin_to_cpu, PhaseTimer};
pub use mix::{generate, generate_with_multiplier, mix, MIX_MULTIPLIER};
pub use multicore::{aggregate_hashrate, run_multicore};
pub use runner::run_core;
pub use scratch::{persist_batch, reload_batch};
pub use stress::{stress_parallel, stress_pass};
pub use warmup::warmup;

use std::fmt;
use std::time::Duration;

/// Knobs for one workload execution. Always passed in from the caller's
/// configuration; core components never hard-code these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadParams {
    /// Number of sample values in one workload batch.
    pub gen_count: usize,
    /// Mixing rounds applied to each value during the compute phase.
    pub mix_rounds: u32,
}

/// Identifies which runner produced a throughput figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// A single pinned logical core.
    Core(usize),
    /// The multi-core aggregate.
    Aggregate,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Core(id) => write!(f, "core_{id}"),
            Target::Aggregate => write!(f, "multicore"),
        }
    }
}

/// Wall-clock duration of each pipeline phase.
///
/// The compute phase is the only one that feeds the reported hashrate; the
/// disk phases are kept separate so I/O overhead never pollutes the
/// compute-throughput figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseTimings {
    /// Batch generation.
    pub generate: Duration,
    /// Persisting the batch to the scratch file.
    pub persist: Duration,
    /// Reloading and parsing the scratch file.
    pub reload: Duration,
    /// Applying the mixing function to every reloaded value.
    pub compute: Duration,
}

impl PhaseTimings {
    /// Full pipeline duration, disk round-trip included.
    pub fn pipeline(&self) -> Duration {
        self.generate + self.persist + self.reload + self.compute
    }
}

/// Outcome of one runner invocation.
#[derive(Debug, Clone)]
pub struct ThroughputResult {
    /// What produced this figure.
    pub target: Target,
    /// Exact number of mixing operations completed.
    pub ops: u64,
    /// Operations per second over the compute phase only.
    pub hashrate: f64,
    /// Per-phase wall-clock breakdown.
    pub phases: PhaseTimings,
}
