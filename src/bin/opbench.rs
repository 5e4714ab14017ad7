//! opbench: run the built-in sample operations from the command line.
//!
//! The built-ins are deliberately tiny machine-level operations (fences,
//! atomic add, integer add) that exercise the adaptive search at the bottom
//! of the timer's range. The registry here is plain data: a name, a unit, and
//! nothing else — registration is not the runner's concern.

use anyhow::{Context, Result};
use clap::Parser;
use opbench::{from_fn, BenchUnit, Runner, RunnerConfig};
use std::hint::black_box;
use std::path::PathBuf;
use std::sync::atomic::{fence, AtomicU64, Ordering};

#[derive(Debug, Parser)]
#[command(
    name = "opbench",
    about = "Run built-in micro-benchmark operations",
    long_about = "
opbench runs a registry of built-in sample operations through the adaptive
benchmark runner: the iteration count of each timed block is scaled up until
the block spans --min-runtime-ms, then repeated --repetitions times and
reduced to mean/median/standard deviation.

Example:
    opbench                          # run everything, 500 ms blocks
    opbench --filter fence           # only the fence benchmarks
    opbench --repetitions 5 -v       # 5 trials, log scaling decisions
    opbench --list                   # list available operations
"
)]
struct Cli {
    /// Run only operations whose name contains this substring
    #[arg(long)]
    filter: Option<String>,

    /// List available operations without running them
    #[arg(long)]
    list: bool,

    /// Minimum accepted block runtime in milliseconds
    #[arg(long, default_value_t = 500)]
    min_runtime_ms: u64,

    /// Number of measurement trials per operation
    #[arg(long, default_value_t = 1)]
    repetitions: u64,

    /// Hard ceiling on the iteration count of a single block
    #[arg(long, default_value_t = 100_000_000_000)]
    max_iterations: u64,

    /// Log every scaling decision of the adaptive search
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Quiet mode (no console output)
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Write JSON results to this directory
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

/// Stateful integer add: the operand is re-derived each repetition so the
/// compiler cannot fold the loop into a constant.
struct IntAdd {
    seed: u64,
    operand: u64,
    acc: u64,
}

impl IntAdd {
    fn new() -> Self {
        Self {
            seed: 0x9e3779b97f4a7c15,
            operand: 0,
            acc: 0,
        }
    }
}

impl BenchUnit for IntAdd {
    fn setup(&mut self) -> Result<()> {
        // xorshift64: cheap per-repetition pseudo-random operand.
        self.seed ^= self.seed << 13;
        self.seed ^= self.seed >> 7;
        self.seed ^= self.seed << 17;
        self.operand = self.seed;
        Ok(())
    }

    fn operate(&mut self) -> Result<()> {
        self.acc = black_box(self.acc.wrapping_add(self.operand));
        Ok(())
    }
}

/// Uncontended atomic add on a single counter.
struct AtomicAdd {
    counter: AtomicU64,
}

impl BenchUnit for AtomicAdd {
    fn operate(&mut self) -> Result<()> {
        black_box(self.counter.fetch_add(1, Ordering::Relaxed));
        Ok(())
    }
}

fn registry() -> Vec<(&'static str, Box<dyn BenchUnit>)> {
    vec![
        ("nop", Box::new(from_fn(|| {}))),
        ("int_add", Box::new(IntAdd::new())),
        (
            "atomic_add",
            Box::new(AtomicAdd {
                counter: AtomicU64::new(0),
            }),
        ),
        ("fence_seqcst", Box::new(from_fn(|| fence(Ordering::SeqCst)))),
        ("fence_acqrel", Box::new(from_fn(|| fence(Ordering::AcqRel)))),
    ]
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut units = registry();

    if cli.list {
        for (name, _) in &units {
            println!("{}", name);
        }
        return Ok(());
    }

    let log_level = if cli.quiet {
        0
    } else if cli.verbose {
        2
    } else {
        1
    };

    let mut config = RunnerConfig::new()
        .min_runtime_ns(cli.min_runtime_ms.saturating_mul(1_000_000))
        .repetitions(cli.repetitions)
        .max_iterations(cli.max_iterations)
        .log_level(log_level);
    if let Some(dir) = &cli.output_dir {
        config = config.output_dir(dir.clone());
    }
    if let Some(f) = &cli.filter {
        config = config.filter(f.clone());
    }

    let mut runner = Runner::with_config(config);

    let mut ran = 0usize;
    for (name, unit) in units.iter_mut() {
        let results = runner
            .run(name, unit.as_mut())
            .with_context(|| format!("benchmark '{}' failed", name))?;
        if !results.is_empty() {
            ran += 1;
        }
    }

    if ran == 0 {
        eprintln!("No operations matched the filter");
    }

    Ok(())
}
