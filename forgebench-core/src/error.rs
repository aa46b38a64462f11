//! Harness error kinds and their propagation policy.
//!
//! Affinity failures are absorbed by the runner (it degrades to unpinned with
//! a warning); everything else aborts the single invocation that hit it and
//! propagates to the orchestrator, which fails that round only.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the workload harness.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// CPU affinity pinning is unavailable on this platform or for this core.
    /// Non-fatal: callers log a warning and continue unpinned.
    #[error("cpu affinity pinning unavailable for core {core}: {source}")]
    AffinityUnsupported {
        /// The logical core that could not be pinned.
        core: usize,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// An I/O operation failed. Fatal to the invocation that owned it.
    #[error("i/o failure during {phase}: {source}")]
    Io {
        /// The phase that was executing ("persist", "reload", "cleanup", "spawn").
        phase: &'static str,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Scratch file contents did not parse back into the persisted batch.
    /// Indicates an I/O or concurrency bug; never swallowed.
    #[error("scratch file {path:?} corrupted on reload: {detail}")]
    MalformedReload {
        /// The scratch file that failed to parse.
        path: PathBuf,
        /// What went wrong, including the offending line.
        detail: String,
    },

    /// A spawned worker terminated abnormally before reporting its count.
    /// The owning coordinator call fails rather than under-reporting.
    #[error("worker {worker} crashed before reporting its operation count")]
    WorkerCrash {
        /// Index of the crashed worker.
        worker: usize,
    },
}

impl HarnessError {
    pub(crate) fn io(phase: &'static str, source: std::io::Error) -> Self {
        HarnessError::Io { phase, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_phase() {
        let err = HarnessError::io(
            "persist",
            std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        );
        let msg = err.to_string();
        assert!(msg.contains("persist"));
        assert!(msg.contains("i/o failure"));
    }

    #[test]
    fn worker_crash_names_the_worker() {
        let err = HarnessError::WorkerCrash { worker: 5 };
        assert!(err.to_string().contains("worker 5"));
    }
}
