//! Best-Effort Platform Probes
//!
//! Raw metric reads from procfs/sysfs on Linux. Every probe returns `Option`:
//! a platform that does not expose a metric degrades that one field to
//! unknown without affecting the sampler. The delta computations
//! ([`cpu_percent`], [`estimate_power_w`]) are pure functions so they behave
//! identically on every platform.

#[cfg(target_os = "linux")]
use std::path::Path;

/// Cumulative CPU time counters from one `/proc/stat` snapshot (jiffies).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuTimes {
    /// Time spent doing work (total minus idle and iowait).
    pub busy: u64,
    /// Total time across all states.
    pub total: u64,
}

/// One battery observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatterySnapshot {
    /// Remaining charge in percent.
    pub percent: f64,
    /// Whether the battery is actively discharging (unplugged under load).
    pub discharging: bool,
}

/// Utilization percent between two snapshots.
///
/// Returns `None` when the counters did not advance (a zero-length interval
/// carries no utilization signal).
pub fn cpu_percent(prev: &CpuTimes, cur: &CpuTimes) -> Option<f64> {
    let total = cur.total.checked_sub(prev.total)?;
    if total == 0 {
        return None;
    }
    let busy = cur.busy.saturating_sub(prev.busy);
    Some(busy as f64 * 100.0 / total as f64)
}

/// Battery-discharge power estimate between two snapshots.
///
/// Projects the percentage drop onto `capacity_wh` and divides by elapsed
/// time. Produces an estimate only while actually discharging with a
/// positive drop; "no battery", "plugged in", and "counter went up" all
/// yield `None` — the same coarse absent state the downstream log records.
pub fn estimate_power_w(
    prev: &BatterySnapshot,
    cur: &BatterySnapshot,
    elapsed_secs: f64,
    capacity_wh: f64,
) -> Option<f64> {
    if !cur.discharging || elapsed_secs <= 0.0 {
        return None;
    }
    let drop_percent = prev.percent - cur.percent;
    if drop_percent <= 0.0 {
        return None;
    }
    Some((drop_percent / 100.0) * capacity_wh * (3600.0 / elapsed_secs))
}

/// Read and parse a single sysfs/procfs value.
#[cfg(target_os = "linux")]
fn read_sysfs<T: std::str::FromStr>(path: &Path) -> Option<T> {
    let raw = std::fs::read_to_string(path).ok()?;
    raw.trim_end_matches('\0').trim().parse().ok()
}

/// Snapshot the aggregate CPU line of `/proc/stat`.
#[cfg(target_os = "linux")]
pub fn read_cpu_times() -> Option<CpuTimes> {
    let stat = std::fs::read_to_string("/proc/stat").ok()?;
    let line = stat.lines().next()?;
    if !line.starts_with("cpu ") {
        return None;
    }
    let fields: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .filter_map(|f| f.parse().ok())
        .collect();
    if fields.len() < 4 {
        return None;
    }
    // user nice system idle iowait irq softirq steal ...
    let total: u64 = fields.iter().sum();
    let idle = fields[3] + fields.get(4).copied().unwrap_or(0);
    Some(CpuTimes {
        busy: total - idle,
        total,
    })
}

/// Average `scaling_cur_freq` across all online CPUs, in MHz.
#[cfg(target_os = "linux")]
pub fn read_average_frequency_mhz() -> Option<f64> {
    let entries = std::fs::read_dir("/sys/devices/system/cpu").ok()?;
    let mut sum_khz = 0u64;
    let mut cpus = 0u64;
    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        let Some(suffix) = name.strip_prefix("cpu") else {
            continue;
        };
        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        if let Some(khz) = read_sysfs::<u64>(&entry.path().join("cpufreq/scaling_cur_freq")) {
            sum_khz += khz;
            cpus += 1;
        }
    }
    (cpus > 0).then(|| sum_khz as f64 / cpus as f64 / 1000.0)
}

/// First readable thermal zone, in degrees Celsius.
#[cfg(target_os = "linux")]
pub fn read_temperature_c() -> Option<f64> {
    let entries = std::fs::read_dir("/sys/class/thermal").ok()?;
    let mut zones: Vec<_> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("thermal_zone"))
        })
        .collect();
    zones.sort();
    zones
        .iter()
        .find_map(|zone| read_sysfs::<i64>(&zone.join("temp")))
        .map(|millideg| millideg as f64 / 1000.0)
}

/// First battery under `/sys/class/power_supply`, if any.
#[cfg(target_os = "linux")]
pub fn read_battery() -> Option<BatterySnapshot> {
    let entries = std::fs::read_dir("/sys/class/power_supply").ok()?;
    for entry in entries.flatten() {
        let path = entry.path();
        match read_sysfs::<String>(&path.join("type")) {
            Some(kind) if kind == "Battery" => {}
            _ => continue,
        }
        let Some(percent) = read_sysfs::<f64>(&path.join("capacity")) else {
            continue;
        };
        let status = read_sysfs::<String>(&path.join("status"));
        return Some(BatterySnapshot {
            percent,
            discharging: status.as_deref() == Some("Discharging"),
        });
    }
    None
}

// Non-Linux: every raw probe degrades to unknown; the pure delta functions
// above still work on whatever snapshots the caller supplies.

#[cfg(not(target_os = "linux"))]
pub fn read_cpu_times() -> Option<CpuTimes> {
    None
}

#[cfg(not(target_os = "linux"))]
pub fn read_average_frequency_mhz() -> Option<f64> {
    None
}

#[cfg(not(target_os = "linux"))]
pub fn read_temperature_c() -> Option<f64> {
    None
}

#[cfg(not(target_os = "linux"))]
pub fn read_battery() -> Option<BatterySnapshot> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_percent_from_deltas() {
        let prev = CpuTimes {
            busy: 50,
            total: 100,
        };
        let cur = CpuTimes {
            busy: 70,
            total: 140,
        };
        // 20 busy jiffies over 40 total.
        assert_eq!(cpu_percent(&prev, &cur), Some(50.0));
    }

    #[test]
    fn cpu_percent_without_progress_is_unknown() {
        let snap = CpuTimes {
            busy: 10,
            total: 100,
        };
        assert_eq!(cpu_percent(&snap, &snap), None);
    }

    #[test]
    fn cpu_percent_handles_counter_regression() {
        let prev = CpuTimes {
            busy: 90,
            total: 100,
        };
        let cur = CpuTimes {
            busy: 80,
            total: 90,
        };
        assert_eq!(cpu_percent(&prev, &cur), None);
    }

    #[test]
    fn power_estimate_while_discharging() {
        let prev = BatterySnapshot {
            percent: 80.0,
            discharging: true,
        };
        let cur = BatterySnapshot {
            percent: 79.0,
            discharging: true,
        };
        // 1% of 50Wh in one minute = 0.5Wh / 60s = 30W.
        assert_eq!(estimate_power_w(&prev, &cur, 60.0, 50.0), Some(30.0));
    }

    #[test]
    fn no_estimate_when_plugged_in() {
        let prev = BatterySnapshot {
            percent: 80.0,
            discharging: true,
        };
        let cur = BatterySnapshot {
            percent: 79.0,
            discharging: false,
        };
        assert_eq!(estimate_power_w(&prev, &cur, 60.0, 50.0), None);
    }

    #[test]
    fn no_estimate_when_charge_rises_or_time_stands_still() {
        let prev = BatterySnapshot {
            percent: 70.0,
            discharging: true,
        };
        let cur = BatterySnapshot {
            percent: 71.0,
            discharging: true,
        };
        assert_eq!(estimate_power_w(&prev, &cur, 60.0, 50.0), None);
        assert_eq!(estimate_power_w(&cur, &prev, 0.0, 50.0), None);
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn proc_stat_snapshot_is_consistent() {
        if let Some(times) = read_cpu_times() {
            assert!(times.total >= times.busy);
        }
    }
}
