#![warn(missing_docs)]
//! ForgeBench Telemetry - Concurrent System Monitoring
//!
//! A lightweight sampler thread that observes the machine while the workload
//! runs: CPU utilization, average core frequency, temperature, and a
//! battery-discharge power estimate, one snapshot per tick, appended to a CSV
//! log. The sampler never perturbs the workload (it sleeps between ticks) and
//! never stops over a missing metric — an absent reading stays absent.

mod log;
mod probes;
mod sampler;

pub use log::{TelemetryLog, CSV_HEADER};
pub use probes::{cpu_percent, estimate_power_w, BatterySnapshot, CpuTimes};
pub use sampler::{SamplerConfig, TelemetryError, TelemetrySampler};

/// One telemetry observation.
///
/// Every metric except the timestamp is optional: `None` means the platform
/// did not expose it at this tick. Unknown is never collapsed to zero, so
/// downstream aggregates cannot mistake a missing probe for an idle machine.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySample {
    /// Seconds since the Unix epoch (platform clock).
    pub time: f64,
    /// Free-text label for the phase being observed (e.g. "SINGLE", "MULTI").
    pub mode: String,
    /// Whole-machine CPU utilization percent, averaged over the last interval.
    pub cpu_total: Option<f64>,
    /// Average current core frequency in MHz.
    pub avg_freq_mhz: Option<f64>,
    /// Temperature in degrees Celsius, best effort.
    pub temperature_c: Option<f64>,
    /// Instantaneous battery-discharge power estimate in watts.
    pub power_w: Option<f64>,
}
