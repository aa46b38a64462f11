//! Concurrent Telemetry Sampler
//!
//! Runs on its own thread beside the workload, taking one snapshot per tick
//! and appending it to the CSV log. Cancellation is cooperative: the stop
//! flag is checked once per interval, so the caller tolerates up to one
//! interval of latency and at most one tail sample after signaling. The
//! caller always joins (via [`TelemetrySampler::stop`]) before reading the
//! log, so it never observes a torn file.

use crate::log::TelemetryLog;
use crate::{probes, TelemetrySample};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::debug;

/// Sampler failures, surfaced when the sampler is joined.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Appending to the telemetry log failed.
    #[error("telemetry log i/o failed: {0}")]
    Io(#[from] io::Error),

    /// The sampler thread panicked.
    #[error("telemetry sampler thread panicked")]
    Panicked,
}

/// Knobs for one sampler instance, passed through from configuration.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Time between snapshots.
    pub interval: Duration,
    /// Label recorded in each row's `mode` column.
    pub mode: String,
    /// Nominal battery capacity used by the power estimate, in watt-hours.
    pub battery_capacity_wh: f64,
}

/// Handle to a running sampler thread.
#[derive(Debug)]
pub struct TelemetrySampler {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<io::Result<usize>>,
}

impl TelemetrySampler {
    /// Spawn the sampler. It owns `log` until [`TelemetrySampler::stop`].
    pub fn spawn(log: TelemetryLog, config: SamplerConfig) -> Result<Self, TelemetryError> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("forge-telemetry".to_string())
            .spawn(move || sample_loop(log, config, flag))?;
        Ok(Self { stop, handle })
    }

    /// Signal the sampler to stop, join it, and return the number of rows it
    /// wrote. After this returns the log file is finalized and safe to read.
    pub fn stop(self) -> Result<usize, TelemetryError> {
        self.stop.store(true, Ordering::Relaxed);
        match self.handle.join() {
            Ok(result) => Ok(result?),
            Err(_) => Err(TelemetryError::Panicked),
        }
    }
}

fn unix_time_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

fn sample_loop(
    mut log: TelemetryLog,
    config: SamplerConfig,
    stop: Arc<AtomicBool>,
) -> io::Result<usize> {
    // Prime the interval-based probes so the first tick reports a real delta
    // instead of a since-boot average.
    let mut prev_cpu = probes::read_cpu_times();
    let mut prev_battery = probes::read_battery();
    let mut prev_tick = Instant::now();
    let mut rows = 0usize;

    while !stop.load(Ordering::Relaxed) {
        thread::sleep(config.interval);

        let tick = Instant::now();
        let elapsed = (tick - prev_tick).as_secs_f64();

        let cur_cpu = probes::read_cpu_times();
        let cpu_total = match (&prev_cpu, &cur_cpu) {
            (Some(prev), Some(cur)) => probes::cpu_percent(prev, cur),
            _ => None,
        };

        let cur_battery = probes::read_battery();
        let power_w = match (&prev_battery, &cur_battery) {
            (Some(prev), Some(cur)) => {
                probes::estimate_power_w(prev, cur, elapsed, config.battery_capacity_wh)
            }
            _ => None,
        };

        log.append(&TelemetrySample {
            time: unix_time_secs(),
            mode: config.mode.clone(),
            cpu_total,
            avg_freq_mhz: probes::read_average_frequency_mhz(),
            temperature_c: probes::read_temperature_c(),
            power_w,
        })?;
        rows += 1;

        prev_cpu = cur_cpu;
        prev_battery = cur_battery;
        prev_tick = tick;
    }

    debug!(rows, mode = %config.mode, "telemetry sampler stopped");
    Ok(rows)
}
