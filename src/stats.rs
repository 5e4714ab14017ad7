//! Statistics reducer over a set of accepted measurements.
//!
//! Each reduction is expressed as a synthetic `Measurement` so summaries can
//! be reported through the same formatting machinery as raw measurements.

use crate::measurement::Measurement;
use serde::{Deserialize, Serialize};

/// Mean / median / sample standard deviation of one run's accepted set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Summary {
    pub mean: Measurement,
    pub median: Measurement,
    pub std_dev: Measurement,
}

impl Summary {
    /// Reduce a set of accepted measurements.
    pub fn of(samples: &[Measurement]) -> Self {
        Self {
            mean: mean(samples),
            median: median(samples),
            std_dev: std_dev(samples),
        }
    }
}

/// Arithmetic mean of `run_time_ns`.
///
/// The reported iteration count is taken from the first entry. All entries
/// of a single run normally share the same count (the search carries it
/// between repetitions), but this is an approximation and is not re-verified.
pub fn mean(samples: &[Measurement]) -> Measurement {
    if samples.is_empty() {
        return Measurement {
            run_time_ns: 0,
            iterations: 0,
        };
    }
    let sum: u64 = samples.iter().map(|m| m.run_time_ns).sum();
    Measurement {
        run_time_ns: sum / samples.len() as u64,
        iterations: samples[0].iterations,
    }
}

/// Median of `run_time_ns`.
///
/// With fewer than 3 samples the median equals the mean (too few samples to
/// be meaningful otherwise). Otherwise a copy of the set is stable-sorted
/// ascending by `run_time_ns`; odd counts take the middle element, even
/// counts average the two central elements.
pub fn median(samples: &[Measurement]) -> Measurement {
    if samples.len() < 3 {
        return mean(samples);
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by_key(|m| m.run_time_ns);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        let lo = sorted[mid - 1];
        let hi = sorted[mid];
        Measurement {
            run_time_ns: (lo.run_time_ns + hi.run_time_ns) / 2,
            iterations: lo.iterations,
        }
    }
}

/// Sample standard deviation of `run_time_ns` (n-1 denominator), rounded to
/// whole nanoseconds. Zero for sets with fewer than two entries.
pub fn std_dev(samples: &[Measurement]) -> Measurement {
    let iterations = samples.first().map_or(0, |m| m.iterations);
    if samples.len() <= 1 {
        return Measurement {
            run_time_ns: 0,
            iterations,
        };
    }
    let count = samples.len() as f64;
    let mean_ns = samples.iter().map(|m| m.run_time_ns as f64).sum::<f64>() / count;
    let variance = samples
        .iter()
        .map(|m| {
            let diff = m.run_time_ns as f64 - mean_ns;
            diff * diff
        })
        .sum::<f64>()
        / (count - 1.0);
    Measurement {
        run_time_ns: variance.sqrt().round() as u64,
        iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(run_time_ns: u64) -> Measurement {
        Measurement {
            run_time_ns,
            iterations: 100,
        }
    }

    #[test]
    fn should_average_run_times_for_mean() {
        let samples = [m(10), m(20), m(30)];
        let mean = mean(&samples);
        assert_eq!(mean.run_time_ns, 20);
        assert_eq!(mean.iterations, 100);
    }

    #[test]
    fn should_return_zero_mean_for_empty_set() {
        let mean = mean(&[]);
        assert_eq!(mean.run_time_ns, 0);
        assert_eq!(mean.iterations, 0);
    }

    #[test]
    fn should_take_middle_element_for_odd_median() {
        let samples = [m(30), m(10), m(20)];
        assert_eq!(median(&samples).run_time_ns, 20);
    }

    #[test]
    fn should_average_central_elements_for_even_median() {
        let samples = [m(40), m(10), m(30), m(20)];
        assert_eq!(median(&samples).run_time_ns, 25);
    }

    #[test]
    fn should_equal_mean_when_fewer_than_three_samples() {
        let samples = [m(10), m(30)];
        assert_eq!(median(&samples).run_time_ns, mean(&samples).run_time_ns);
        let one = [m(42)];
        assert_eq!(median(&one).run_time_ns, 42);
    }

    #[test]
    fn should_use_bessel_correction_for_std_dev() {
        // variance = ((-10)^2 + 0 + 10^2) / (3 - 1) = 100
        let samples = [m(10), m(20), m(30)];
        assert_eq!(std_dev(&samples).run_time_ns, 10);
    }

    #[test]
    fn should_return_zero_std_dev_for_small_sets() {
        assert_eq!(std_dev(&[]).run_time_ns, 0);
        assert_eq!(std_dev(&[m(99)]).run_time_ns, 0);
    }

    #[test]
    fn should_report_first_iteration_count_in_summary() {
        let samples = [
            Measurement {
                run_time_ns: 10,
                iterations: 100,
            },
            Measurement {
                run_time_ns: 20,
                iterations: 200,
            },
            Measurement {
                run_time_ns: 30,
                iterations: 300,
            },
        ];
        let summary = Summary::of(&samples);
        assert_eq!(summary.mean.iterations, 100);
        assert_eq!(summary.std_dev.iterations, 100);
    }
}
