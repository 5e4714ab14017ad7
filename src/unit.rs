//! The benchmarked unit: one operation plus optional lifecycle hooks.

use anyhow::Result;

/// A unit of work the runner can measure.
///
/// `operate` is the only required capability; the lifecycle hooks default to
/// no-ops. The runner calls them in this order:
///
/// - `construct`: once per `Runner::run` call, before any repetition;
/// - `setup`: once per repetition, before the adaptive search begins;
/// - `operate`: `iterations` times back-to-back inside each timed block;
/// - `teardown`: once per repetition, after the search accepted a measurement.
///
/// `setup` and `teardown` are never inside a timed block, so their cost does
/// not pollute the measurement. Any hook failure aborts the run (see
/// [`BenchError`](crate::BenchError)).
///
/// Stateful units implement this trait directly; stateless operations (pure
/// machine-instruction cost, e.g. a memory fence) go through [`from_fn`].
pub trait BenchUnit {
    /// One-time initialization before any repetition.
    fn construct(&mut self) -> Result<()> {
        Ok(())
    }

    /// Per-repetition preparation, e.g. regenerating operands.
    fn setup(&mut self) -> Result<()> {
        Ok(())
    }

    /// The operation under test. Called back-to-back inside the timed block;
    /// keep it free of allocation, I/O, and yields.
    fn operate(&mut self) -> Result<()>;

    /// Per-repetition cleanup.
    fn teardown(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A stateless operation adapted from an infallible closure.
pub struct OpFn<F: FnMut()>(F);

impl<F: FnMut()> BenchUnit for OpFn<F> {
    fn operate(&mut self) -> Result<()> {
        (self.0)();
        Ok(())
    }
}

/// Wrap an infallible closure as a benchmarked unit with no lifecycle hooks.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::atomic::{fence, Ordering};
///
/// let mut unit = opbench::from_fn(|| fence(Ordering::SeqCst));
/// ```
pub fn from_fn<F: FnMut()>(f: F) -> OpFn<F> {
    OpFn(f)
}

/// A stateless operation adapted from a fallible closure.
pub struct TryOpFn<F: FnMut() -> Result<()>>(F);

impl<F: FnMut() -> Result<()>> BenchUnit for TryOpFn<F> {
    fn operate(&mut self) -> Result<()> {
        (self.0)()
    }
}

/// Wrap a fallible closure as a benchmarked unit with no lifecycle hooks.
pub fn try_from_fn<F: FnMut() -> Result<()>>(f: F) -> TryOpFn<F> {
    TryOpFn(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::cell::Cell;

    #[test]
    fn should_invoke_closure_on_each_operate() {
        let count = Cell::new(0u64);
        let mut unit = from_fn(|| count.set(count.get() + 1));
        unit.operate().unwrap();
        unit.operate().unwrap();
        drop(unit);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn should_default_lifecycle_hooks_to_noops() {
        let mut unit = from_fn(|| {});
        assert!(unit.construct().is_ok());
        assert!(unit.setup().is_ok());
        assert!(unit.teardown().is_ok());
    }

    #[test]
    fn should_propagate_failure_from_fallible_closure() {
        let mut unit = try_from_fn(|| bail!("bad operand"));
        assert!(unit.operate().is_err());
    }
}
