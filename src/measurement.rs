//! Measurement types produced by the runner.

use serde::{Deserialize, Serialize};

/// One completed timed block: wall-clock elapsed nanoseconds for executing
/// `iterations` back-to-back calls to the benchmarked operation.
///
/// Immutable once created. Ordering for median computation is by
/// `run_time_ns` with a stable sort, so ties keep their original order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    /// Elapsed wall-clock time for the whole block, in nanoseconds.
    pub run_time_ns: u64,
    /// Number of operation calls executed in the block.
    pub iterations: u64,
}

impl Measurement {
    /// Cost of a single operation call in nanoseconds.
    ///
    /// Returns `0.0` for a zero-iteration measurement (only reachable through
    /// synthetic summary values over an empty set).
    pub fn ns_per_op(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.run_time_ns as f64 / self.iterations as f64
    }

    /// Elapsed block time in seconds.
    pub fn seconds(&self) -> f64 {
        self.run_time_ns as f64 / 1_000_000_000.0
    }
}

/// All measurements collected by one `Runner::run` call.
///
/// `accepted` holds exactly one entry per completed repetition, in repetition
/// order. `attempts` holds the rejected measurements taken while the adaptive
/// search was still scaling the iteration count, also in order. Both are
/// append-only while the run is in progress and read-only afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunResults {
    /// One accepted measurement per repetition.
    pub accepted: Vec<Measurement>,
    /// Rejected measurements from the adaptive search, across all repetitions.
    pub attempts: Vec<Measurement>,
}

impl RunResults {
    /// True if no repetition completed (filtered out, or `repetitions == 0`).
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_compute_ns_per_op_when_iterations_nonzero() {
        let m = Measurement {
            run_time_ns: 1_000,
            iterations: 4,
        };
        assert_eq!(m.ns_per_op(), 250.0);
    }

    #[test]
    fn should_return_zero_ns_per_op_when_iterations_zero() {
        let m = Measurement {
            run_time_ns: 1_000,
            iterations: 0,
        };
        assert_eq!(m.ns_per_op(), 0.0);
    }

    #[test]
    fn should_convert_to_seconds() {
        let m = Measurement {
            run_time_ns: 1_500_000_000,
            iterations: 1,
        };
        assert_eq!(m.seconds(), 1.5);
    }

    #[test]
    fn should_serialize_run_results_as_json() {
        let results = RunResults {
            accepted: vec![Measurement {
                run_time_ns: 10,
                iterations: 2,
            }],
            attempts: vec![],
        };
        let json = serde_json::to_string(&results).unwrap();
        assert!(json.contains("\"run_time_ns\":10"));
        assert!(json.contains("\"iterations\":2"));
    }
}
