//! Per-feature likelihood selection.
//!
//! Each feature value is scored under one of two families, chosen by its
//! magnitude: values below [`CONTINUOUS_THRESHOLD`] are treated as counts
//! and scored with a Poisson mass, larger values with a Normal density.

use crate::stats::FeatureStats;
use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, Discrete, Normal, Poisson};

/// Values at or above this magnitude use the continuous density.
pub const CONTINUOUS_THRESHOLD: f64 = 500.0;

/// Standard deviation used for the continuous density.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GaussianSpread {
    /// `sqrt(mean)`, the Poisson variance-equals-mean approximation.
    #[default]
    PoissonApprox,
    /// The class-conditional population std from training, floored at a
    /// minimum when it is zero.
    Fitted,
}

/// A single feature's likelihood under one class.
///
/// # Examples
///
/// ```
/// use poisson_bayes::classification::{GaussianSpread, Likelihood};
/// use poisson_bayes::stats::FeatureStats;
///
/// let stats = FeatureStats { count: 10, mean: 3.0, std: 1.0 };
/// let lik = Likelihood::select(2.7, &stats, GaussianSpread::PoissonApprox, 1e-9);
/// assert_eq!(lik, Likelihood::DiscreteCount { rate: 3.0, count: 2 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Likelihood {
    /// Poisson mass with rate `rate` at `count`.
    DiscreteCount {
        /// Class-conditional mean
        rate: f64,
        /// Feature value truncated toward zero
        count: i64,
    },
    /// Normal density at `value`.
    ContinuousDensity {
        /// Class-conditional mean
        mean: f64,
        /// Standard deviation per [`GaussianSpread`]
        std: f64,
        /// Raw feature value
        value: f64,
    },
    /// No information; contributes `ln 1 = 0`.
    Neutral,
}

impl Likelihood {
    /// Chooses the likelihood family for `value` given class statistics.
    ///
    /// A class cell without training rows, or a non-finite value, is
    /// [`Likelihood::Neutral`].
    #[must_use]
    pub fn select(value: f64, stats: &FeatureStats, spread: GaussianSpread, min_std: f64) -> Self {
        if !stats.is_defined() || !value.is_finite() {
            return Self::Neutral;
        }
        if value < CONTINUOUS_THRESHOLD {
            #[allow(clippy::cast_possible_truncation)]
            let count = value.trunc() as i64;
            Self::DiscreteCount {
                rate: stats.mean,
                count,
            }
        } else {
            let std = match spread {
                GaussianSpread::PoissonApprox => stats.mean.sqrt(),
                GaussianSpread::Fitted => stats.std.max(min_std),
            };
            Self::ContinuousDensity {
                mean: stats.mean,
                std,
                value,
            }
        }
    }

    /// Probability mass or density.
    ///
    /// Invalid distribution parameters (rate or std not strictly positive)
    /// give `NaN`; a negative count has zero mass.
    #[must_use]
    pub fn probability(&self) -> f64 {
        match *self {
            Self::DiscreteCount { rate, count } => {
                let Ok(count) = u64::try_from(count) else {
                    return 0.0;
                };
                Poisson::new(rate).map_or(f64::NAN, |p| p.pmf(count))
            }
            Self::ContinuousDensity { mean, std, value } => {
                Normal::new(mean, std).map_or(f64::NAN, |n| n.pdf(value))
            }
            Self::Neutral => 1.0,
        }
    }

    /// Natural log of [`Self::probability`], `None` when not finite.
    #[must_use]
    pub fn log_probability(&self) -> Option<f64> {
        let lp = self.probability().ln();
        lp.is_finite().then_some(lp)
    }
}
