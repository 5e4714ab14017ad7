//! Configuration for the benchmark runner.

use std::path::PathBuf;

/// Default minimum accepted block runtime: 500 ms.
pub const DEFAULT_MIN_RUNTIME_NS: u64 = 500_000_000;
/// Default hard ceiling on the iteration count: 1e11.
pub const DEFAULT_MAX_ITERATIONS: u64 = 100_000_000_000;

/// Configuration for the benchmark runner.
///
/// Set once by the caller before running; immutable during a run. The
/// invariants `min_runtime_ns > 0` and `max_iterations >= 1` are maintained
/// by the setters and by `from_env`, which clamp zero values up to 1.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Nanoseconds a timed block must span to be accepted.
    pub min_runtime_ns: u64,
    /// Number of independent measurement trials.
    pub repetitions: u64,
    /// Hard ceiling on the iteration count of a single timed block.
    pub max_iterations: u64,
    /// 0 = silent, 1 = per-attempt/per-repetition lines, 2 = also log each
    /// scaling decision.
    pub log_level: u8,
    /// Directory for JSON results; `None` disables the JSON reporter.
    pub output_dir: Option<PathBuf>,
    /// Run only benchmarks whose name contains this substring.
    pub filter: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            min_runtime_ns: DEFAULT_MIN_RUNTIME_NS,
            repetitions: 1,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            log_level: 1,
            output_dir: None,
            filter: None,
        }
    }
}

impl RunnerConfig {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse config from environment variables.
    ///
    /// Supported variables:
    /// - `OPBENCH_MIN_RUNTIME_NS`: minimum accepted block runtime (default: 500000000)
    /// - `OPBENCH_REPETITIONS`: measurement trials (default: 1)
    /// - `OPBENCH_MAX_ITERATIONS`: iteration ceiling (default: 100000000000)
    /// - `OPBENCH_LOG_LEVEL`: console verbosity 0-2 (default: 1)
    /// - `OPBENCH_OUTPUT_DIR`: directory for JSON results
    /// - `OPBENCH_FILTER`: run only benchmarks matching this substring
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("OPBENCH_MIN_RUNTIME_NS") {
            if let Ok(n) = v.parse::<u64>() {
                cfg.min_runtime_ns = n.max(1);
            }
        }
        if let Ok(v) = std::env::var("OPBENCH_REPETITIONS") {
            if let Ok(n) = v.parse() {
                cfg.repetitions = n;
            }
        }
        if let Ok(v) = std::env::var("OPBENCH_MAX_ITERATIONS") {
            if let Ok(n) = v.parse::<u64>() {
                cfg.max_iterations = n.max(1);
            }
        }
        if let Ok(v) = std::env::var("OPBENCH_LOG_LEVEL") {
            if let Ok(n) = v.parse() {
                cfg.log_level = n;
            }
        }
        if let Ok(v) = std::env::var("OPBENCH_OUTPUT_DIR") {
            cfg.output_dir = Some(PathBuf::from(v));
        }
        if let Ok(v) = std::env::var("OPBENCH_FILTER") {
            cfg.filter = Some(v);
        }

        cfg
    }

    /// Set the minimum accepted block runtime in nanoseconds (clamped to >= 1).
    pub fn min_runtime_ns(mut self, ns: u64) -> Self {
        self.min_runtime_ns = ns.max(1);
        self
    }

    /// Set the number of measurement trials.
    ///
    /// `0` makes `Runner::run` return an empty result set immediately.
    pub fn repetitions(mut self, n: u64) -> Self {
        self.repetitions = n;
        self
    }

    /// Set the iteration ceiling (clamped to >= 1).
    pub fn max_iterations(mut self, n: u64) -> Self {
        self.max_iterations = n.max(1);
        self
    }

    /// Set console verbosity (0 = silent, 1 = lines, 2 = scaling decisions).
    pub fn log_level(mut self, level: u8) -> Self {
        self.log_level = level;
        self
    }

    /// Set the output directory for JSON results.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set filter pattern.
    pub fn filter(mut self, pattern: impl Into<String>) -> Self {
        self.filter = Some(pattern.into());
        self
    }

    /// Clear filter pattern.
    pub fn no_filter(mut self) -> Self {
        self.filter = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_use_defaults_when_env_not_set() {
        let cfg = RunnerConfig::default();
        assert_eq!(cfg.min_runtime_ns, 500_000_000);
        assert_eq!(cfg.repetitions, 1);
        assert_eq!(cfg.max_iterations, 100_000_000_000);
        assert_eq!(cfg.log_level, 1);
        assert!(cfg.output_dir.is_none());
    }

    #[test]
    fn should_build_config_with_builder() {
        let cfg = RunnerConfig::new()
            .min_runtime_ns(1_000_000)
            .repetitions(5)
            .max_iterations(1000)
            .log_level(0)
            .filter("int_add");

        assert_eq!(cfg.min_runtime_ns, 1_000_000);
        assert_eq!(cfg.repetitions, 5);
        assert_eq!(cfg.max_iterations, 1000);
        assert_eq!(cfg.log_level, 0);
        assert_eq!(cfg.filter, Some("int_add".to_string()));
    }

    #[test]
    fn should_clamp_zero_thresholds_to_one() {
        let cfg = RunnerConfig::new().min_runtime_ns(0).max_iterations(0);
        assert_eq!(cfg.min_runtime_ns, 1);
        assert_eq!(cfg.max_iterations, 1);
    }
}
