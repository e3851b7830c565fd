//! Streaming moment accumulation for class-conditional statistics.
//!
//! [`Moments`] keeps count, sum and sum of squares so it can be filled in a
//! single pass and merged across row partitions.
//!
//! # Examples
//!
//! ```
//! use poisson_bayes::stats::Moments;
//!
//! let mut m = Moments::new();
//! for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
//!     m.push(v);
//! }
//! assert_eq!(m.mean(), Some(5.0));
//! assert_eq!(m.population_std(), Some(2.0));
//! ```

use serde::{Deserialize, Serialize};

/// Running count, sum and sum of squares.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments {
    count: u64,
    sum: f64,
    sum_sq: f64,
}

impl Moments {
    /// Empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one observation.
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_sq += value * value;
    }

    /// Folds another accumulator into this one.
    pub fn merge(&mut self, other: &Self) {
        self.count += other.count;
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
    }

    /// Number of observations.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns `true` if nothing was pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Arithmetic mean, `None` when empty.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }

    /// Second moment minus squared mean, clamped at zero.
    ///
    /// Divides by the full count (no Bessel correction).
    #[must_use]
    pub fn population_variance(&self) -> Option<f64> {
        let mean = self.mean()?;
        let variance = self.sum_sq / self.count as f64 - mean * mean;
        Some(variance.max(0.0))
    }

    /// Square root of [`Self::population_variance`].
    #[must_use]
    pub fn population_std(&self) -> Option<f64> {
        self.population_variance().map(f64::sqrt)
    }

    /// Freezes the accumulator into a summary.
    #[must_use]
    pub fn summarize(&self) -> FeatureStats {
        FeatureStats {
            count: self.count,
            mean: self.mean().unwrap_or(0.0),
            std: self.population_std().unwrap_or(0.0),
        }
    }
}

/// Mean and population standard deviation of one feature within one class.
///
/// `count == 0` marks a class with no training rows; `mean` and `std` are
/// then reported as `0` and must not be used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureStats {
    /// Number of training rows contributing.
    pub count: u64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
}

impl FeatureStats {
    /// Returns `true` if at least one training row contributed.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.count > 0
    }

    /// Returns `true` if all contributing values were identical.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.is_defined() && self.std == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_moments() {
        let m = Moments::new();
        assert!(m.is_empty());
        assert_eq!(m.mean(), None);
        assert_eq!(m.population_std(), None);
        let s = m.summarize();
        assert!(!s.is_defined());
        assert_eq!((s.mean, s.std), (0.0, 0.0));
    }

    #[test]
    fn test_population_not_sample_std() {
        let mut m = Moments::new();
        m.push(1.0);
        m.push(3.0);
        assert_relative_eq!(m.population_variance().unwrap(), 1.0);
        assert_relative_eq!(m.population_std().unwrap(), 1.0);
    }

    #[test]
    fn test_constant_values_zero_std() {
        let mut m = Moments::new();
        for _ in 0..7 {
            m.push(0.1);
        }
        // 0.1 is inexact; rounding must not yield a NaN std
        let std = m.population_std().unwrap();
        assert!(std.is_finite());
        assert!(std < 1e-6);
    }

    #[test]
    fn test_single_value_is_constant() {
        let mut m = Moments::new();
        m.push(42.0);
        let s = m.summarize();
        assert_eq!(s.count, 1);
        assert_eq!(s.mean, 42.0);
        assert!(s.is_constant());
    }

    #[test]
    fn test_merge_matches_sequential() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let mut all = Moments::new();
        values.iter().for_each(|&v| all.push(v));

        let mut left = Moments::new();
        let mut right = Moments::new();
        values[..3].iter().for_each(|&v| left.push(v));
        values[3..].iter().for_each(|&v| right.push(v));
        left.merge(&right);

        assert_eq!(left.count(), all.count());
        assert_relative_eq!(left.mean().unwrap(), all.mean().unwrap());
        assert_relative_eq!(
            left.population_std().unwrap(),
            all.population_std().unwrap(),
            epsilon = 1e-12
        );
    }
}
