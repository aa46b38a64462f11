//! Phase Timing and CPU Affinity
//!
//! Wall-clock timing for the pipeline phases, and affinity pinning so a
//! per-core run actually executes on the core it reports for.

use crate::HarnessError;
use std::time::{Duration, Instant};

/// Lap timer for consecutive pipeline phases.
///
/// Each call to [`PhaseTimer::lap`] returns the wall-clock time since the
/// previous lap (or since construction) and starts the next phase.
#[derive(Debug)]
pub struct PhaseTimer {
    last: Instant,
}

impl PhaseTimer {
    /// Start timing the first phase.
    #[inline]
    pub fn start() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// End the current phase, returning its duration.
    #[inline]
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now - self.last;
        self.last = now;
        elapsed
    }
}

/// Restrict the calling thread to a single logical core.
///
/// Keeps a per-core measurement on the core it claims to measure and avoids
/// mid-run migrations skewing the phase timings.
#[cfg(target_os = "linux")]
pub fn pin_to_cpu(cpu: usize) -> Result<(), HarnessError> {
    use std::mem::MaybeUninit;

    unsafe {
        let mut set = MaybeUninit::<libc::cpu_set_t>::zeroed();
        let set_ref = set.assume_init_mut();

        libc::CPU_ZERO(set_ref);
        libc::CPU_SET(cpu, set_ref);

        let result = libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), set_ref);

        if result == 0 {
            Ok(())
        } else {
            Err(HarnessError::AffinityUnsupported {
                core: cpu,
                source: std::io::Error::last_os_error(),
            })
        }
    }
}

/// Affinity pinning is not available on this platform; callers degrade to
/// running unpinned.
#[cfg(not(target_os = "linux"))]
pub fn pin_to_cpu(cpu: usize) -> Result<(), HarnessError> {
    Err(HarnessError::AffinityUnsupported {
        core: cpu,
        source: std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "sched_setaffinity is linux-only",
        ),
    })
}
