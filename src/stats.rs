//! Lazily cached aggregate statistics for a sample store.
//!
//! A [`StatsSnapshot`] is computed in a single linear pass over the logical
//! sample sequence and cached by the owning store until the next mutation
//! (dirty-flag pattern: the cache slot is cleared on every mutating call and
//! refilled on the first statistic read after that).
//!
//! ## Semantics
//!
//! - `mean = sum / n`, `var = sum_sq / n - mean^2`,
//!   `std = sqrt(max(var, 0))` — the clamp guards against small negative
//!   variances produced by floating-point cancellation.
//! - Empty sequence: all four statistics are `0.0`. Callers that need to
//!   distinguish "no samples" from "all zeros" should check the store's
//!   length first.
//! - Non-finite samples are not special-cased: NaN and infinities flow
//!   through ordinary IEEE-754 comparisons and arithmetic unchanged.

/// Aggregate statistics over the logical contents of a store.
///
/// # Example
///
/// ```
/// use samplekit::stats::StatsSnapshot;
///
/// let snap = StatsSnapshot::compute([3.0, 4.0, 5.0].into_iter());
/// assert_eq!(snap.min, 3.0);
/// assert_eq!(snap.max, 5.0);
/// assert_eq!(snap.mean, 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSnapshot {
    /// Smallest sample, `0.0` when empty.
    pub min: f64,
    /// Largest sample, `0.0` when empty.
    pub max: f64,
    /// Arithmetic mean, `0.0` when empty.
    pub mean: f64,
    /// Population standard deviation, `0.0` when empty; never negative.
    pub std: f64,
}

impl StatsSnapshot {
    /// The sentinel snapshot for an empty sequence.
    pub const EMPTY: StatsSnapshot = StatsSnapshot {
        min: 0.0,
        max: 0.0,
        mean: 0.0,
        std: 0.0,
    };

    /// Computes a snapshot in one pass over `samples`.
    pub fn compute(samples: impl Iterator<Item = f64>) -> StatsSnapshot {
        let mut n = 0usize;
        let mut min = 0.0f64;
        let mut max = 0.0f64;
        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;

        for v in samples {
            if n == 0 {
                min = v;
                max = v;
            } else {
                if v < min {
                    min = v;
                }
                if v > max {
                    max = v;
                }
            }
            sum += v;
            sum_sq += v * v;
            n += 1;
        }

        if n == 0 {
            return StatsSnapshot::EMPTY;
        }

        let inv_n = 1.0 / n as f64;
        let mean = sum * inv_n;
        let var = sum_sq * inv_n - mean * mean;
        let std = if var > 0.0 { var.sqrt() } else { 0.0 };

        StatsSnapshot { min, max, mean, std }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_yields_sentinel() {
        assert_eq!(StatsSnapshot::compute(std::iter::empty()), StatsSnapshot::EMPTY);
    }

    #[test]
    fn single_sample_has_zero_std() {
        let snap = StatsSnapshot::compute(std::iter::once(7.5));
        assert_eq!(snap.min, 7.5);
        assert_eq!(snap.max, 7.5);
        assert_eq!(snap.mean, 7.5);
        assert_eq!(snap.std, 0.0);
    }

    #[test]
    fn known_sequence_statistics() {
        let snap = StatsSnapshot::compute([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].into_iter());
        assert_eq!(snap.min, 2.0);
        assert_eq!(snap.max, 9.0);
        assert_eq!(snap.mean, 5.0);
        assert!((snap.std - 2.0).abs() < 1e-12);
    }

    #[test]
    fn negative_samples_are_handled() {
        let snap = StatsSnapshot::compute([-3.0, -1.0, -2.0].into_iter());
        assert_eq!(snap.min, -3.0);
        assert_eq!(snap.max, -1.0);
        assert_eq!(snap.mean, -2.0);
    }

    #[test]
    fn std_is_never_negative_under_cancellation() {
        // Identical large values: sum_sq/n - mean^2 can come out as a tiny
        // negative number instead of exactly zero.
        let v = 1.0e8 + 0.1;
        let snap = StatsSnapshot::compute(std::iter::repeat(v).take(1000));
        assert!(snap.std >= 0.0);
    }
}
