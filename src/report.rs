//! Pluggable reporters for benchmark output.

use crate::config::RunnerConfig;
use crate::measurement::{Measurement, RunResults};
use crate::stats::Summary;
use serde::Serialize;
use std::path::PathBuf;

/// Trait for benchmark progress and result reporters.
///
/// The runner invokes every hook regardless of `log_level`; reporters decide
/// what to emit. Default implementations do nothing.
pub trait Reporter: Send + Sync {
    /// Called once before the first repetition.
    fn run_start(&self, _name: &str, _config: &RunnerConfig) {}

    /// Called for each rejected measurement during the adaptive search.
    fn attempt(&self, _name: &str, _measurement: &Measurement) {}

    /// Called each time the search grows the iteration count.
    fn scaled(&self, _name: &str, _from: u64, _to: u64, _measurement: &Measurement) {}

    /// Called for each accepted repetition.
    fn accepted(&self, _name: &str, _measurement: &Measurement) {}

    /// Called with the reduced statistics after all repetitions.
    fn summary(&self, _name: &str, _summary: &Summary) {}

    /// Called once with the complete result set, after `summary`.
    fn run_end(
        &self,
        _name: &str,
        _config: &RunnerConfig,
        _results: &RunResults,
        _summary: Option<&Summary>,
    ) {
    }
}

/// Fixed width of the left-justified label column.
const LABEL_WIDTH: usize = 22;
/// Fixed width of the right-justified iteration-count column.
const ITERATIONS_WIDTH: usize = 14;
/// Fixed width of the right-justified elapsed-seconds column.
const SECONDS_WIDTH: usize = 12;
/// Fixed width of the right-justified ns-per-op column.
const NS_PER_OP_WIDTH: usize = 18;

/// Console reporter that prints fixed-width lines to stderr.
///
/// Output is human-readable only; the layout carries no stability guarantee.
pub struct ConsoleReporter {
    log_level: u8,
}

impl ConsoleReporter {
    pub fn new(log_level: u8) -> Self {
        Self { log_level }
    }

    fn format_line(label: &str, m: &Measurement) -> String {
        format!(
            "{:<lw$}{:>iw$}{:>sw$}{:>nw$}",
            label,
            m.iterations,
            format!("{:.3} s", m.seconds()),
            format!("{:.3} ns/op", m.ns_per_op()),
            lw = LABEL_WIDTH,
            iw = ITERATIONS_WIDTH,
            sw = SECONDS_WIDTH,
            nw = NS_PER_OP_WIDTH,
        )
    }
}

impl Reporter for ConsoleReporter {
    fn attempt(&self, name: &str, measurement: &Measurement) {
        if self.log_level >= 1 {
            eprintln!("{}", Self::format_line(name, measurement));
        }
    }

    fn scaled(&self, name: &str, from: u64, to: u64, measurement: &Measurement) {
        if self.log_level >= 2 {
            eprintln!(
                "{}: {} ns at {} iterations, scaling to {}",
                name, measurement.run_time_ns, from, to
            );
        }
    }

    fn accepted(&self, name: &str, measurement: &Measurement) {
        if self.log_level >= 1 {
            eprintln!("{}", Self::format_line(name, measurement));
        }
    }

    fn summary(&self, name: &str, summary: &Summary) {
        if self.log_level >= 1 {
            eprintln!("{} mean", Self::format_line(name, &summary.mean));
            eprintln!("{} median", Self::format_line(name, &summary.median));
            eprintln!("{} std dev", Self::format_line(name, &summary.std_dev));
        }
    }
}

/// JSON reporter that writes one file per benchmark run.
///
/// Failures are warnings on stderr, never errors: a benchmark that measured
/// successfully should not fail because a results directory is read-only.
pub struct JsonReporter {
    output_dir: PathBuf,
}

impl JsonReporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[derive(Serialize)]
struct RunReport<'a> {
    name: &'a str,
    started_at: String,
    min_runtime_ns: u64,
    repetitions: u64,
    max_iterations: u64,
    accepted: &'a [Measurement],
    attempts: &'a [Measurement],
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a Summary>,
}

impl Reporter for JsonReporter {
    fn run_end(
        &self,
        name: &str,
        config: &RunnerConfig,
        results: &RunResults,
        summary: Option<&Summary>,
    ) {
        let report = RunReport {
            name,
            started_at: unix_millis(),
            min_runtime_ns: config.min_runtime_ns,
            repetitions: config.repetitions,
            max_iterations: config.max_iterations,
            accepted: &results.accepted,
            attempts: &results.attempts,
            summary,
        };
        if let Err(e) = self.write(name, &report) {
            eprintln!("Warning: failed to write JSON results: {}", e);
        }
    }
}

impl JsonReporter {
    fn write(&self, name: &str, report: &RunReport<'_>) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.output_dir)?;
        let filename = format!("{}.json", name.replace('/', "_"));
        let path = self.output_dir.join(filename);
        let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
        std::fs::write(&path, json)?;
        Ok(())
    }
}

/// Compact unique timestamp: unix milliseconds, filename- and JSON-safe.
fn unix_millis() -> String {
    let duration = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}", duration.as_millis())
}

/// Combines multiple reporters.
pub struct MultiReporter {
    reporters: Vec<Box<dyn Reporter>>,
}

impl MultiReporter {
    pub fn new(reporters: Vec<Box<dyn Reporter>>) -> Self {
        Self { reporters }
    }
}

impl Reporter for MultiReporter {
    fn run_start(&self, name: &str, config: &RunnerConfig) {
        for r in &self.reporters {
            r.run_start(name, config);
        }
    }

    fn attempt(&self, name: &str, measurement: &Measurement) {
        for r in &self.reporters {
            r.attempt(name, measurement);
        }
    }

    fn scaled(&self, name: &str, from: u64, to: u64, measurement: &Measurement) {
        for r in &self.reporters {
            r.scaled(name, from, to, measurement);
        }
    }

    fn accepted(&self, name: &str, measurement: &Measurement) {
        for r in &self.reporters {
            r.accepted(name, measurement);
        }
    }

    fn summary(&self, name: &str, summary: &Summary) {
        for r in &self.reporters {
            r.summary(name, summary);
        }
    }

    fn run_end(
        &self,
        name: &str,
        config: &RunnerConfig,
        results: &RunResults,
        summary: Option<&Summary>,
    ) {
        for r in &self.reporters {
            r.run_end(name, config, results, summary);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_format_fixed_width_columns() {
        let m = Measurement {
            run_time_ns: 1_500_000_000,
            iterations: 1000,
        };
        let line = ConsoleReporter::format_line("int_add", &m);
        assert_eq!(
            line.len(),
            LABEL_WIDTH + ITERATIONS_WIDTH + SECONDS_WIDTH + NS_PER_OP_WIDTH
        );
        assert!(line.starts_with("int_add"));
        assert!(line.contains("1.500 s"));
        assert!(line.ends_with("1500000.000 ns/op"));
    }

    #[test]
    fn should_right_justify_iteration_count() {
        let m = Measurement {
            run_time_ns: 500,
            iterations: 7,
        };
        let line = ConsoleReporter::format_line("x", &m);
        // Iteration column ends at LABEL_WIDTH + ITERATIONS_WIDTH.
        let col = &line[LABEL_WIDTH..LABEL_WIDTH + ITERATIONS_WIDTH];
        assert_eq!(col.trim_start(), "7");
        assert!(col.starts_with(' '));
    }
}
