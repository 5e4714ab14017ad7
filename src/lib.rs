//! # opbench
//!
//! An adaptive micro-benchmark runner. Given a unit of work (an operation
//! with optional lifecycle hooks), it measures wall-clock execution time with
//! enough statistical rigor to report stable per-operation cost despite timer
//! granularity.
//!
//! Unlike single-shot harnesses, opbench searches for an iteration count
//! whose timed block spans a configurable minimum runtime, so operations far
//! below the timer's resolution (a fence, an integer add) still produce
//! meaningful per-op numbers. Repeated trials are reduced to mean, median,
//! and sample standard deviation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use opbench::{Runner, RunnerConfig};
//!
//! let config = RunnerConfig::new()
//!     .min_runtime_ns(500_000_000)
//!     .repetitions(3);
//! let mut runner = Runner::with_config(config);
//!
//! let mut acc = 0u64;
//! let mut unit = opbench::from_fn(|| {
//!     acc = std::hint::black_box(acc.wrapping_add(1));
//! });
//! let results = runner.run("int_add", &mut unit)?;
//! assert_eq!(results.accepted.len(), 3);
//! # Ok::<(), opbench::BenchError>(())
//! ```
//!
//! Stateful benchmarks implement [`BenchUnit`] directly and get `construct`
//! (once per run), `setup`/`teardown` (once per repetition, never timed), and
//! `operate` (the timed call).
//!
//! opbench does not suppress compiler optimization on the caller's behalf:
//! keep results observable (`std::hint::black_box`, atomics, memory
//! ordering) in the unit itself.

mod config;
mod error;
mod measurement;
mod report;
mod runner;
mod unit;

pub mod stats;

pub use config::{RunnerConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_MIN_RUNTIME_NS};
pub use error::BenchError;
pub use measurement::{Measurement, RunResults};
pub use report::{ConsoleReporter, JsonReporter, MultiReporter, Reporter};
pub use runner::Runner;
pub use stats::Summary;
pub use unit::{from_fn, try_from_fn, BenchUnit, OpFn, TryOpFn};
