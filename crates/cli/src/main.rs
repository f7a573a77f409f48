//! Out-of-order pipeline simulator CLI.
//!
//! This binary is the thin front end over the simulation core. It performs:
//! 1. **Configuration:** Built-in defaults, an optional JSON config file, and
//!    per-resource flag overrides (`-r -j -k -l -f`).
//! 2. **Trace input:** Opens the decoded-instruction trace file.
//! 3. **Output:** Prints a configuration banner, the optional per-instruction
//!    stage-entry table, and the run statistics.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, ensure};
use clap::Parser;

use oosim_core::config::Config;
use oosim_core::pipeline::Pipeline;
use oosim_core::stats::ProcStats;
use oosim_core::trace::FileTrace;

#[derive(Parser, Debug)]
#[command(
    name = "oosim",
    author,
    version,
    about = "Out-of-order superscalar processor timing simulator",
    long_about = "Simulate a Tomasulo-style out-of-order pipeline over a decoded \
                  instruction trace.\n\nTrace format: one record per line: hex address, \
                  op class (0/1/2, -1 for class 1), destination register, two source \
                  registers; negative register fields mean \"none\".\n\nExamples:\n  \
                  oosim -t traces/gcc.100k.tr\n  oosim -t traces/gcc.100k.tr -r 2 -j 3 -k 3 -l 3 -f 8 --timing"
)]
struct Cli {
    /// Instruction trace file.
    #[arg(short, long)]
    trace: PathBuf,

    /// Result buses (CDBs) drained per cycle.
    #[arg(short = 'r', long)]
    result_buses: Option<usize>,

    /// Class-0 functional units.
    #[arg(short = 'j', long)]
    k0: Option<usize>,

    /// Class-1 functional units.
    #[arg(short = 'k', long)]
    k1: Option<usize>,

    /// Class-2 functional units.
    #[arg(short = 'l', long)]
    k2: Option<usize>,

    /// Instructions fetched per cycle.
    #[arg(short = 'f', long)]
    fetch_width: Option<usize>,

    /// JSON configuration file; explicit flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the per-instruction stage-entry table after the run.
    #[arg(long)]
    timing: bool,

    /// Trace every stage event to stderr.
    #[arg(long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str::<Config>(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(r) = cli.result_buses {
        config.pipeline.result_buses = r;
    }
    if let Some(k0) = cli.k0 {
        config.pipeline.units_class0 = k0;
    }
    if let Some(k1) = cli.k1 {
        config.pipeline.units_class1 = k1;
    }
    if let Some(k2) = cli.k2 {
        config.pipeline.units_class2 = k2;
    }
    if let Some(f) = cli.fetch_width {
        config.pipeline.fetch_width = f;
    }
    config.general.trace_stages |= cli.verbose;

    ensure!(
        config.pipeline.result_buses >= 1,
        "at least one result bus is required"
    );
    ensure!(
        config.pipeline.fetch_width >= 1,
        "fetch width must be at least 1"
    );

    println!(
        "Configuration: R={} k0={} k1={} k2={} F={} (station capacity {}, release {:?})",
        config.pipeline.result_buses,
        config.pipeline.units_class0,
        config.pipeline.units_class1,
        config.pipeline.units_class2,
        config.pipeline.fetch_width,
        config.pipeline.station_capacity(),
        config.pipeline.fu_release,
    );

    let source = FileTrace::open(&cli.trace)?;
    let mut pipeline = Pipeline::new(&config, source);
    let mut stats = ProcStats::default();
    pipeline.run(&mut stats)?;

    if cli.timing {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        pipeline.write_timing_log(&mut out)?;
        out.flush()?;
    }
    stats.print();
    Ok(())
}
