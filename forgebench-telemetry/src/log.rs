//! Telemetry CSV Log
//!
//! Append-only time series, one row per sampling tick:
//! `time,mode,cpu_total,avg_freq_mhz,temperature_c,power_w`. Unknown metrics
//! are written as empty fields, never as zero. Rows are flushed as they are
//! appended so the file is complete the moment the sampler is joined.

use crate::TelemetrySample;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Column header, matching the row order of [`TelemetryLog::append`].
pub const CSV_HEADER: &str = "time,mode,cpu_total,avg_freq_mhz,temperature_c,power_w";

/// Writer for one run's telemetry time series.
#[derive(Debug)]
pub struct TelemetryLog {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl TelemetryLog {
    /// Create the log file and write the header row.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{CSV_HEADER}")?;
        writer.flush()?;
        Ok(Self {
            writer,
            path: path.to_path_buf(),
        })
    }

    /// Reopen an existing log to append more rows (no second header).
    ///
    /// Used when consecutive workload phases share one time series, e.g. the
    /// SINGLE and MULTI phases of a stress run.
    pub fn open_append(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
        })
    }

    /// Append one sample row and flush it.
    pub fn append(&mut self, sample: &TelemetrySample) -> io::Result<()> {
        writeln!(
            self.writer,
            "{:.3},{},{},{},{},{}",
            sample.time,
            sample.mode,
            optional(sample.cpu_total),
            optional(sample.avg_freq_mhz),
            optional(sample.temperature_c),
            optional(sample.power_w),
        )?;
        self.writer.flush()
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn optional(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.3}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: f64) -> TelemetrySample {
        TelemetrySample {
            time,
            mode: "SINGLE".to_string(),
            cpu_total: Some(87.5),
            avg_freq_mhz: Some(3200.0),
            temperature_c: None,
            power_w: None,
        }
    }

    #[test]
    fn header_then_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("telemetry.csv");

        let mut log = TelemetryLog::create(&path).unwrap();
        log.append(&sample(100.0)).unwrap();
        log.append(&sample(101.0)).unwrap();
        drop(log);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "100.000,SINGLE,87.500,3200.000,,");
    }

    #[test]
    fn unknown_fields_are_empty_not_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("telemetry.csv");

        let mut log = TelemetryLog::create(&path).unwrap();
        log.append(&TelemetrySample {
            time: 5.0,
            mode: "MULTI".to_string(),
            cpu_total: None,
            avg_freq_mhz: None,
            temperature_c: None,
            power_w: None,
        })
        .unwrap();
        drop(log);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().nth(1).unwrap(), "5.000,MULTI,,,,");
    }

    #[test]
    fn append_continues_without_a_second_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("telemetry.csv");

        let mut log = TelemetryLog::create(&path).unwrap();
        log.append(&sample(1.0)).unwrap();
        drop(log);

        let mut log = TelemetryLog::open_append(&path).unwrap();
        log.append(&sample(2.0)).unwrap();
        drop(log);

        let contents = std::fs::read_to_string(&path).unwrap();
        let headers = contents.lines().filter(|l| *l == CSV_HEADER).count();
        assert_eq!(headers, 1);
        assert_eq!(contents.lines().count(), 3);
    }
}
