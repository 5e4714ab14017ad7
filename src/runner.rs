//! The main benchmark runner: repetition loop plus adaptive iteration search.

use crate::config::RunnerConfig;
use crate::error::BenchError;
use crate::measurement::{Measurement, RunResults};
use crate::report::{ConsoleReporter, JsonReporter, Reporter};
use crate::stats::Summary;
use crate::unit::BenchUnit;
use std::time::Instant;

/// Drives repetitions of "find a stable iteration count, time it, record it".
///
/// Strictly single-threaded and synchronous: the timed inner loop contains
/// nothing but the `operate` calls, so the elapsed time is attributable
/// entirely to the operation under test.
///
/// # Example
///
/// ```rust,no_run
/// use opbench::{Runner, RunnerConfig};
///
/// let config = RunnerConfig::new()
///     .min_runtime_ns(100_000_000)
///     .repetitions(3);
/// let mut runner = Runner::with_config(config);
///
/// let mut unit = opbench::from_fn(|| {
///     std::sync::atomic::fence(std::sync::atomic::Ordering::SeqCst);
/// });
/// let results = runner.run("fence_seqcst", &mut unit)?;
/// assert_eq!(results.accepted.len(), 3);
/// # Ok::<(), opbench::BenchError>(())
/// ```
pub struct Runner {
    config: RunnerConfig,
    reporters: Vec<Box<dyn Reporter>>,
}

impl Runner {
    /// Create a runner with config taken from the environment.
    pub fn new() -> Self {
        Self::with_config(RunnerConfig::from_env())
    }

    /// Create a runner with explicit config.
    ///
    /// Default reporters: console (always, gated by `log_level`) plus JSON
    /// when `output_dir` is set.
    pub fn with_config(config: RunnerConfig) -> Self {
        let mut reporters: Vec<Box<dyn Reporter>> =
            vec![Box::new(ConsoleReporter::new(config.log_level))];
        if let Some(dir) = &config.output_dir {
            reporters.push(Box::new(JsonReporter::new(dir.clone())));
        }
        Self { config, reporters }
    }

    /// The active configuration.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Replace reporters with a custom set.
    pub fn reporters(&mut self, reporters: Vec<Box<dyn Reporter>>) -> &mut Self {
        self.reporters = reporters;
        self
    }

    /// Add an additional reporter.
    pub fn add_reporter(&mut self, reporter: Box<dyn Reporter>) -> &mut Self {
        self.reporters.push(reporter);
        self
    }

    fn should_run(&self, name: &str) -> bool {
        match &self.config.filter {
            Some(f) => name.contains(f.as_str()),
            None => true,
        }
    }

    /// Measure a benchmarked unit.
    ///
    /// Per repetition: `setup`, adaptive search for an iteration count whose
    /// timed block spans `min_runtime_ns` (or saturates at `max_iterations`),
    /// `teardown`, record the accepted measurement. The accepted iteration
    /// count carries over to the next repetition's search, which re-verifies
    /// it rather than trusting it blindly.
    ///
    /// Returns an empty `RunResults` without touching the unit when the name
    /// does not match the configured filter, or when `repetitions == 0` (in
    /// which case no statistics are computed and no summary is reported).
    pub fn run<U: BenchUnit + ?Sized>(
        &mut self,
        name: &str,
        unit: &mut U,
    ) -> Result<RunResults, BenchError> {
        let mut results = RunResults::default();
        if !self.should_run(name) || self.config.repetitions == 0 {
            return Ok(results);
        }

        for r in &self.reporters {
            r.run_start(name, &self.config);
        }

        unit.construct().map_err(BenchError::Construction)?;

        let mut iterations = 1u64;
        for _ in 0..self.config.repetitions {
            unit.setup().map_err(BenchError::Setup)?;
            let accepted = self.search(name, unit, iterations, &mut results.attempts)?;
            unit.teardown().map_err(BenchError::Teardown)?;

            iterations = accepted.iterations;
            for r in &self.reporters {
                r.accepted(name, &accepted);
            }
            results.accepted.push(accepted);
        }

        let summary = Summary::of(&results.accepted);
        for r in &self.reporters {
            r.summary(name, &summary);
        }
        for r in &self.reporters {
            r.run_end(name, &self.config, &results, Some(&summary));
        }

        Ok(results)
    }

    /// Adaptive doubling/scaling search for one repetition.
    ///
    /// Geometric, not binary: it trades extra early measurements for fast
    /// convergence, and the final 1.4x multiplier avoids overshooting once
    /// near the target runtime. Timer reads have fixed overhead and limited
    /// resolution, so a single iteration is usually too fast to measure
    /// meaningfully; hence the aggressive 1000x jump at the bottom of the
    /// range.
    ///
    /// Terminates because each step either reaches `min_runtime_ns` or grows
    /// the iteration count, which saturates at `max_iterations`.
    fn search<U: BenchUnit + ?Sized>(
        &self,
        name: &str,
        unit: &mut U,
        start_iterations: u64,
        attempts: &mut Vec<Measurement>,
    ) -> Result<Measurement, BenchError> {
        let min_runtime_ns = self.config.min_runtime_ns;
        let max_iterations = self.config.max_iterations;
        let mut iterations = start_iterations.clamp(1, max_iterations);

        loop {
            let run_time_ns = time_block(unit, iterations)?;
            let measurement = Measurement {
                run_time_ns,
                iterations,
            };

            if run_time_ns >= min_runtime_ns || iterations >= max_iterations {
                return Ok(measurement);
            }

            attempts.push(measurement);
            for r in &self.reporters {
                r.attempt(name, &measurement);
            }

            let grown = if run_time_ns < 1_000 {
                // Likely under the timer's resolution floor.
                iterations.saturating_mul(1_000)
            } else if run_time_ns < min_runtime_ns / 10 {
                iterations.saturating_mul(10)
            } else {
                iterations.saturating_mul(14) / 10
            };
            // 14/10 is a fixed point below 3 iterations; force progress so
            // termination never depends on the multiplier.
            let next = grown.max(iterations + 1).min(max_iterations);
            for r in &self.reporters {
                r.scaled(name, iterations, next, &measurement);
            }
            iterations = next;
        }
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

/// Time exactly `iterations` back-to-back `operate` calls as one block.
///
/// The loop body is only the operation call and its error check; no
/// allocation, I/O, or yields happen between the timer reads.
fn time_block<U: BenchUnit + ?Sized>(unit: &mut U, iterations: u64) -> Result<u64, BenchError> {
    let start = Instant::now();
    for _ in 0..iterations {
        unit.operate().map_err(BenchError::Operation)?;
    }
    Ok(start.elapsed().as_nanos() as u64)
}
