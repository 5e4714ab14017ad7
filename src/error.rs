//! Error taxonomy for benchmark execution.

use std::error::Error as StdError;
use std::fmt;

/// A lifecycle hook of the benchmarked unit failed.
///
/// Each variant wraps whatever underlying failure the corresponding hook
/// produced. Any hook failure aborts `Runner::run` immediately: there is no
/// retry, no partial result, and remaining repetitions are not attempted. A
/// benchmark whose setup or operation cannot run correctly produces no
/// meaningful timing, so partial results would be misleading.
#[derive(Debug)]
pub enum BenchError {
    /// The `construct` hook failed before any repetition started.
    Construction(anyhow::Error),
    /// A repetition's `setup` hook failed; `operate` and `teardown` did not
    /// run for that repetition.
    Setup(anyhow::Error),
    /// An `operate` call failed inside a timed block; no measurement was
    /// recorded for that block and `teardown` did not run.
    Operation(anyhow::Error),
    /// A repetition's `teardown` hook failed after its measurement was
    /// accepted.
    Teardown(anyhow::Error),
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchError::Construction(e) => write!(f, "construct hook failed: {}", e),
            BenchError::Setup(e) => write!(f, "setup hook failed: {}", e),
            BenchError::Operation(e) => write!(f, "operate call failed: {}", e),
            BenchError::Teardown(e) => write!(f, "teardown hook failed: {}", e),
        }
    }
}

impl StdError for BenchError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        let inner = match self {
            BenchError::Construction(e)
            | BenchError::Setup(e)
            | BenchError::Operation(e)
            | BenchError::Teardown(e) => e,
        };
        Some(inner.as_ref())
    }
}
