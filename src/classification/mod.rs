//! Poisson naive Bayes classification.
//!
//! Each numeric feature is modelled per class by its mean. At prediction
//! time a value below [`CONTINUOUS_THRESHOLD`] is scored as a count under a
//! Poisson distribution with that mean as rate; a larger value is scored
//! under a Normal density. Per-feature log-likelihoods are summed under the
//! naive independence assumption and combined with class priors.
//!
//! # Example
//!
//! ```
//! use poisson_bayes::prelude::*;
//!
//! let mut rows = Vec::new();
//! let mut labels = Vec::new();
//! for _ in 0..10 {
//!     rows.push(vec![2.0, 5.0]);
//!     labels.push("A");
//!     rows.push(vec![20.0, 50.0]);
//!     labels.push("B");
//! }
//! let data = LabeledDataset::from_rows(&rows, &labels).expect("rows and labels line up");
//!
//! let model = PoissonNB::new().fit(&data).expect("Training data is valid");
//! let p = model.predict_row(&[2.0, 5.0]).expect("two features");
//! assert_eq!(p.label(), "A");
//! assert!(p.confidence("A").expect("known class") > 0.5);
//! ```

mod estimator;
mod likelihood;
mod model;
mod prediction;

pub use likelihood::{GaussianSpread, Likelihood, CONTINUOUS_THRESHOLD};
pub use model::PoissonModel;
pub use prediction::Prediction;

use crate::data::{Attribute, ClassCatalog, LabeledDataset, LabeledRows};
use crate::error::{BayesError, Result};
use crate::traits::{Capability, Learner};
use tracing::{debug, info};

/// Poisson naive Bayes learner.
///
/// Accepts numeric attributes with a binominal or polynominal label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoissonNB {
    /// Std source for values at or above the threshold
    gaussian_spread: GaussianSpread,
    /// Std floor for zero-variance cells under [`GaussianSpread::Fitted`]
    min_std: f64,
    /// Batch prediction across rows with rayon
    parallel: bool,
}

impl PoissonNB {
    /// Creates a learner with default settings.
    ///
    /// # Example
    ///
    /// ```
    /// use poisson_bayes::classification::PoissonNB;
    ///
    /// let nb = PoissonNB::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            gaussian_spread: GaussianSpread::PoissonApprox,
            min_std: 1e-9,
            parallel: true,
        }
    }

    /// Sets the standard deviation source for the continuous density.
    ///
    /// # Example
    ///
    /// ```
    /// use poisson_bayes::classification::{GaussianSpread, PoissonNB};
    ///
    /// let nb = PoissonNB::new().with_gaussian_spread(GaussianSpread::Fitted);
    /// ```
    #[must_use]
    pub fn with_gaussian_spread(mut self, spread: GaussianSpread) -> Self {
        self.gaussian_spread = spread;
        self
    }

    /// Sets the std floor used when a fitted std is zero.
    #[must_use]
    pub fn with_min_std(mut self, min_std: f64) -> Self {
        self.min_std = min_std;
        self
    }

    /// Enables or disables rayon batch prediction.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Trains on a dataset after checking its capabilities.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - an attribute is not numeric or a value is missing
    /// - the dataset is empty
    /// - fewer than 2 classes are present
    /// - `min_std` is not finite and positive
    pub fn fit(&self, data: &LabeledDataset) -> Result<PoissonModel> {
        if data.x().is_empty() {
            return Err(BayesError::empty_input("training rows"));
        }
        self.check_capabilities(data)?;
        self.fit_rows(data, data.attributes().to_vec(), data.catalog().clone())
    }

    /// Trains on bare rows with caller-supplied metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if an attribute is not numeric, the metadata
    /// disagrees with the rows, or the rows cannot be fitted.
    pub fn fit_rows<R: LabeledRows + ?Sized>(
        &self,
        rows: &R,
        attributes: Vec<Attribute>,
        catalog: ClassCatalog,
    ) -> Result<PoissonModel> {
        if !(self.min_std.is_finite() && self.min_std > 0.0) {
            return Err(BayesError::InvalidHyperparameter {
                param: "min_std".to_string(),
                value: self.min_std.to_string(),
                constraint: "finite and > 0".to_string(),
            });
        }
        self.check_attributes(&attributes)?;
        if attributes.len() != rows.n_features() {
            return Err(BayesError::dimension_mismatch(
                "attributes",
                rows.n_features(),
                attributes.len(),
            ));
        }
        if catalog.len() != rows.n_classes() {
            return Err(BayesError::dimension_mismatch(
                "classes",
                rows.n_classes(),
                catalog.len(),
            ));
        }

        let estimate = estimator::estimate(rows)?;
        let priors = estimate.priors();
        let n_classes = catalog.len();
        info!(
            rows = estimate.n_rows,
            features = attributes.len(),
            classes = n_classes,
            "trained Poisson naive Bayes"
        );
        for (class, value) in catalog.values().iter().enumerate() {
            debug!(class = %value, prior = priors[class], rows = estimate.class_counts[class], "class prior");
        }
        for (i, s) in estimate.stats.iter().enumerate() {
            let (feature, class) = (i / n_classes, i % n_classes);
            if !s.is_defined() {
                debug!(feature, class, "no training rows, likelihood is neutral");
            } else if s.is_constant() {
                debug!(feature, class, mean = s.mean, "zero variance");
            }
        }

        Ok(PoissonModel::new(
            attributes,
            catalog,
            estimate.stats,
            priors,
            estimate.class_counts,
            estimate.n_rows,
            self.gaussian_spread,
            self.min_std,
            self.parallel,
        ))
    }
}

impl Default for PoissonNB {
    fn default() -> Self {
        Self::new()
    }
}

impl Learner for PoissonNB {
    type Model = PoissonModel;

    fn supports(&self, capability: Capability) -> bool {
        matches!(
            capability,
            Capability::NumericalAttributes
                | Capability::BinominalLabel
                | Capability::PolynominalLabel
        )
    }

    fn learn(&self, data: &LabeledDataset) -> Result<PoissonModel> {
        self.fit(data)
    }
}
