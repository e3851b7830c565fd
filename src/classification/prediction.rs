//! Posterior confidences and the per-row prediction result.

use std::sync::Arc;
use tracing::warn;

/// Predicted class and normalized confidences for one row.
///
/// Confidences are indexed in class-catalog order and sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    class_index: usize,
    classes: Arc<[String]>,
    confidences: Vec<f64>,
    fallback: bool,
}

impl Prediction {
    pub(crate) fn new(classes: Arc<[String]>, posterior: Posterior) -> Self {
        Self {
            class_index: posterior.class_index,
            classes,
            confidences: posterior.confidences,
            fallback: posterior.fallback,
        }
    }

    /// Index of the predicted class.
    #[must_use]
    pub fn class_index(&self) -> usize {
        self.class_index
    }

    /// Value of the predicted class.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.classes[self.class_index]
    }

    /// Confidence per class, in class-index order.
    #[must_use]
    pub fn confidences(&self) -> &[f64] {
        &self.confidences
    }

    /// Confidence of a class value.
    #[must_use]
    pub fn confidence(&self, label: &str) -> Option<f64> {
        self.classes
            .iter()
            .position(|c| c == label)
            .map(|i| self.confidences[i])
    }

    /// Returns `true` if no class had a finite score and the confidences
    /// are the uniform fallback.
    ///
    /// A model produced by fitting or by deserialization always has at
    /// least one positive prior, and non-finite likelihood terms are
    /// skipped, so its predictions never take this path.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

/// Arg-max class and normalized confidences.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Posterior {
    pub class_index: usize,
    pub confidences: Vec<f64>,
    pub fallback: bool,
}

impl Posterior {
    fn uniform(n_classes: usize) -> Self {
        let p = 1.0 / n_classes as f64;
        Self {
            class_index: 0,
            confidences: vec![p; n_classes],
            fallback: true,
        }
    }
}

/// Combines priors with summed log-likelihoods.
///
/// Scores are `prior * exp(log_likelihood)`, evaluated in the log domain
/// and shifted by the largest finite log score so that underflow of every
/// raw score does not erase the ranking. The first class with the strictly
/// greatest score wins. If no class has a finite log score the result is
/// the uniform distribution with class 0.
pub(crate) fn posterior(priors: &[f64], log_likelihoods: &[f64]) -> Posterior {
    debug_assert_eq!(priors.len(), log_likelihoods.len());
    let n_classes = priors.len();

    let log_scores: Vec<f64> = priors
        .iter()
        .zip(log_likelihoods)
        .map(|(&prior, &ll)| prior.ln() + ll)
        .collect();
    let max = log_scores
        .iter()
        .copied()
        .filter(|s| s.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        warn!(n_classes, "no class has a finite score, using uniform confidences");
        return Posterior::uniform(n_classes);
    }

    let scores: Vec<f64> = log_scores
        .iter()
        .map(|&s| if s.is_nan() { 0.0 } else { (s - max).exp() })
        .collect();
    let sum: f64 = scores.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        warn!(n_classes, sum, "class scores cannot be normalized, using uniform confidences");
        return Posterior::uniform(n_classes);
    }

    let mut class_index = 0;
    let mut best = f64::NEG_INFINITY;
    for (i, &score) in scores.iter().enumerate() {
        if score > best {
            class_index = i;
            best = score;
        }
    }

    Posterior {
        class_index,
        confidences: scores.iter().map(|s| s / sum).collect(),
        fallback: false,
    }
}
