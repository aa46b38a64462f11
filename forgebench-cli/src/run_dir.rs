//! Run Directories
//!
//! One uniquely-numbered directory per invocation, never reused or
//! overwritten. The context is created once by the orchestrator and passed
//! by reference into every component that needs a path; there is no
//! process-wide run-numbering state.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Paths for one invocation's artifacts.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Directory holding all numbered runs plus `analysis/`.
    pub base_dir: PathBuf,
    /// This invocation's own directory (`<base>/run<N>`).
    pub run_dir: PathBuf,
    /// The numeric suffix of `run_dir`.
    pub run_id: u32,
}

impl RunContext {
    /// Create the base layout and claim the first unused `runN` directory.
    ///
    /// `create_dir` is the claim: it fails on an existing directory, so two
    /// concurrent invocations can never share a run number.
    pub fn create(base_dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(base_dir)?;
        fs::create_dir_all(base_dir.join("analysis"))?;

        let mut run_id = 1u32;
        loop {
            let run_dir = base_dir.join(format!("run{run_id}"));
            match fs::create_dir(&run_dir) {
                Ok(()) => {
                    return Ok(Self {
                        base_dir: base_dir.to_path_buf(),
                        run_dir,
                        run_id,
                    })
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => run_id += 1,
                Err(e) => return Err(e),
            }
        }
    }

    /// Telemetry time-series log for this run.
    pub fn telemetry_log_path(&self) -> PathBuf {
        self.run_dir.join("telemetry.csv")
    }

    /// Per-target benchmark summary.
    pub fn summary_csv_path(&self) -> PathBuf {
        self.run_dir.join("summary.csv")
    }

    /// Stress-mode key:value summary.
    pub fn stress_summary_path(&self) -> PathBuf {
        self.run_dir.join("summary.txt")
    }

    /// Machine-readable run report.
    pub fn report_json_path(&self) -> PathBuf {
        self.run_dir.join("report.json")
    }

    /// Cross-run analysis directory.
    pub fn analysis_dir(&self) -> PathBuf {
        self.base_dir.join("analysis")
    }
}
