//! Configuration loading from forge.toml
//!
//! ForgeBench configuration can be specified in a `forge.toml` file,
//! discovered by walking up from the current directory. CLI flags override
//! file values, which override the built-in defaults. Every knob is a
//! pass-through parameter into the core components.

use crate::Cli;
use forgebench_core::WorkloadParams;
use forgebench_report::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// ForgeBench file configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ForgeConfig {
    /// Workload and measurement knobs.
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Telemetry sampler knobs.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// Output knobs.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Workload and measurement configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Sample values per workload batch.
    #[serde(default = "default_gen_count")]
    pub gen_count: usize,
    /// Mixing rounds per value.
    #[serde(default = "default_mix_rounds")]
    pub mix_rounds: u32,
    /// Measurement rounds per run.
    #[serde(default = "default_rounds")]
    pub rounds: u32,
    /// Warm-up duration (e.g. "15s", "500ms").
    #[serde(default = "default_warmup")]
    pub warmup_time: String,
    /// Total random products for one stress pass.
    #[serde(default = "default_stress_iterations")]
    pub stress_iterations: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            gen_count: default_gen_count(),
            mix_rounds: default_mix_rounds(),
            rounds: default_rounds(),
            warmup_time: default_warmup(),
            stress_iterations: default_stress_iterations(),
        }
    }
}

fn default_gen_count() -> usize {
    200_000
}
fn default_mix_rounds() -> u32 {
    32
}
fn default_rounds() -> u32 {
    3
}
fn default_warmup() -> String {
    "15s".to_string()
}
fn default_stress_iterations() -> u64 {
    100_000_000
}

/// Telemetry sampler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Sampling interval (e.g. "1s").
    #[serde(default = "default_interval")]
    pub interval: String,
    /// Nominal battery capacity for the power estimate, watt-hours.
    #[serde(default = "default_battery_capacity")]
    pub battery_capacity_wh: f64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            battery_capacity_wh: default_battery_capacity(),
        }
    }
}

fn default_interval() -> String {
    "1s".to_string()
}
fn default_battery_capacity() -> f64 {
    50.0
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Base directory that holds the numbered run directories.
    #[serde(default = "default_base_dir")]
    pub base_dir: String,
    /// Terminal output format: "human" or "json".
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            format: default_format(),
        }
    }
}

fn default_base_dir() -> String {
    "forge_runs".to_string()
}
fn default_format() -> String {
    "human".to_string()
}

impl ForgeConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from the current
    /// directory.
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("forge.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }
}

/// Parse a duration string (e.g. "15s", "500ms", "2m").
pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return Err(anyhow::anyhow!("Empty duration string"));
    }

    // Find where the number ends and the unit begins
    let (num_part, unit_part) = s
        .char_indices()
        .find(|(_, c)| c.is_alphabetic())
        .map(|(i, _)| s.split_at(i))
        .unwrap_or((s, "s"));

    let value: f64 = num_part
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid duration number: {}", num_part))?;

    let nanos_per_unit: u64 = match unit_part.to_lowercase().as_str() {
        "ns" => 1,
        "us" => 1_000,
        "ms" => 1_000_000,
        "s" | "" => 1_000_000_000,
        "m" | "min" => 60_000_000_000,
        _ => return Err(anyhow::anyhow!("Unknown duration unit: {}", unit_part)),
    };

    Ok(Duration::from_nanos((value * nanos_per_unit as f64) as u64))
}

/// Fully-resolved knobs for one invocation: CLI flags > forge.toml > defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Workload parameters handed to the core runners.
    pub params: WorkloadParams,
    /// Measurement rounds.
    pub rounds: u32,
    /// Warm-up duration.
    pub warmup: Duration,
    /// Telemetry sampling interval.
    pub sample_interval: Duration,
    /// Nominal battery capacity for the power estimate.
    pub battery_capacity_wh: f64,
    /// Total random products for one stress pass.
    pub stress_iterations: u64,
    /// Logical cores to drive (defaults to all of them).
    pub workers: usize,
    /// Base directory for run directories.
    pub base_dir: PathBuf,
    /// Terminal output format.
    pub format: OutputFormat,
}

impl ResolvedConfig {
    /// Merge CLI flags over file configuration over defaults.
    pub fn resolve(cli: &Cli, file: &ForgeConfig) -> anyhow::Result<Self> {
        let warmup_str = cli.warmup.as_deref().unwrap_or(&file.runner.warmup_time);
        let interval_str = cli.interval.as_deref().unwrap_or(&file.telemetry.interval);
        let format_str = cli.format.as_deref().unwrap_or(&file.output.format);

        let stress_iterations = match &cli.command {
            Some(crate::Commands::Stress {
                iterations: Some(n),
            }) => *n,
            _ => file.runner.stress_iterations,
        };

        Ok(Self {
            params: WorkloadParams {
                gen_count: cli.gen_count.unwrap_or(file.runner.gen_count),
                mix_rounds: cli.mix_rounds.unwrap_or(file.runner.mix_rounds),
            },
            rounds: cli.rounds.unwrap_or(file.runner.rounds),
            warmup: parse_duration(warmup_str)?,
            sample_interval: parse_duration(interval_str)?,
            battery_capacity_wh: file.telemetry.battery_capacity_wh,
            stress_iterations,
            workers: cli.workers.unwrap_or_else(available_cores),
            base_dir: cli
                .base_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(&file.output.base_dir)),
            format: format_str
                .parse()
                .map_err(|e| anyhow::anyhow!("{e}"))?,
        })
    }
}

/// Logical core count of this machine.
pub fn available_cores() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1)
}
