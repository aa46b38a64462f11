#![warn(missing_docs)]
//! ForgeBench CLI Library
//!
//! Argument parsing, configuration resolution, and the entry point used by
//! the `forgebench` binary:
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     forgebench_cli::run()
//! }
//! ```

mod analyze;
mod config;
mod orchestrator;
mod run_dir;

pub use analyze::analyze_runs;
pub use config::{available_cores, parse_duration, ForgeConfig, ResolvedConfig};
pub use orchestrator::{run_bench, run_stress};
pub use run_dir::RunContext;

use clap::{Parser, Subcommand};
use forgebench_report::system_info;

/// ForgeBench CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "forgebench")]
#[command(author, version, about = "ForgeBench - CPU saturation and hashrate harness")]
pub struct Cli {
    /// Optional subcommand; defaults to `bench`.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Sample values per workload batch.
    #[arg(long)]
    pub gen_count: Option<usize>,

    /// Mixing rounds per value.
    #[arg(long)]
    pub mix_rounds: Option<u32>,

    /// Measurement rounds per run.
    #[arg(long)]
    pub rounds: Option<u32>,

    /// Warm-up duration (e.g. "15s", "500ms").
    #[arg(long)]
    pub warmup: Option<String>,

    /// Telemetry sampling interval (e.g. "1s").
    #[arg(long)]
    pub interval: Option<String>,

    /// Logical cores to drive (defaults to all of them).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Base directory for numbered run directories.
    #[arg(long)]
    pub base_dir: Option<std::path::PathBuf>,

    /// Terminal output format: "human" or "json".
    #[arg(long)]
    pub format: Option<String>,

    /// Verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the hashrate benchmark (default).
    Bench,
    /// Saturate the CPU with the random-product stress workload.
    Stress {
        /// Total random products per pass (overrides forge.toml).
        #[arg(long)]
        iterations: Option<u64>,
    },
    /// Recompute the cross-run analysis summary.
    Analyze,
    /// Print machine information.
    Info,
}

/// Run the ForgeBench CLI. This is the binary's entry point.
pub fn run() -> anyhow::Result<()> {
    run_with_cli(Cli::parse())
}

/// Run the ForgeBench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    let filter = if cli.verbose {
        "forgebench_core=debug,forgebench_telemetry=debug,forgebench_cli=debug"
    } else {
        "forgebench_core=info,forgebench_telemetry=info,forgebench_cli=info"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let file = ForgeConfig::discover().unwrap_or_default();
    let config = ResolvedConfig::resolve(&cli, &file)?;

    match cli.command.unwrap_or(Commands::Bench) {
        Commands::Bench => {
            run_bench(&config)?;
        }
        Commands::Stress { .. } => {
            run_stress(&config)?;
        }
        Commands::Analyze => match analyze_runs(&config.base_dir)? {
            Some(path) => println!("Analysis written to {}", path.display()),
            None => println!(
                "No stress summaries under {} yet",
                config.base_dir.display()
            ),
        },
        Commands::Info => print_info(&config),
    }
    Ok(())
}

fn print_info(config: &ResolvedConfig) {
    let info = system_info(available_cores() as u32);
    println!("OS:        {}", info.os);
    println!("CPU:       {}", info.cpu);
    println!("Cores:     {}", info.cpu_cores);
    println!("Workers:   {}", config.workers);
    println!(
        "Workload:  {} values x {} mixing rounds per batch",
        config.params.gen_count, config.params.mix_rounds
    );
}
