//! The trained Poisson naive Bayes model.

use super::likelihood::{GaussianSpread, Likelihood};
use super::prediction::{posterior, Prediction};
use crate::data::{Attribute, ClassCatalog, FeatureTable};
use crate::error::{BayesError, Result};
use crate::primitives::Matrix;
use crate::stats::FeatureStats;
use crate::traits::Classifier;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Class priors and per-(feature, class) mean/std captured at training.
///
/// Immutable once built; share it freely across threads for prediction.
///
/// # Examples
///
/// ```
/// use poisson_bayes::prelude::*;
///
/// let data = LabeledDataset::from_rows(
///     &[vec![1.0], vec![2.0], vec![9.0], vec![11.0]],
///     &["low", "low", "high", "high"],
/// ).expect("valid dataset");
/// let model = PoissonNB::new().fit(&data).expect("two classes");
/// let p = model.predict_row(&[10.0]).expect("one feature");
/// assert_eq!(p.label(), "high");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawPoissonModel")]
pub struct PoissonModel {
    attributes: Vec<Attribute>,
    catalog: ClassCatalog,
    /// Feature-major: `stats[f * n_classes + c]`.
    stats: Vec<FeatureStats>,
    priors: Vec<f64>,
    class_counts: Vec<u64>,
    n_training_rows: usize,
    gaussian_spread: GaussianSpread,
    min_std: f64,
    parallel: bool,
}

/// Unchecked serialized form of [`PoissonModel`].
#[derive(Deserialize)]
struct RawPoissonModel {
    attributes: Vec<Attribute>,
    catalog: ClassCatalog,
    stats: Vec<FeatureStats>,
    priors: Vec<f64>,
    class_counts: Vec<u64>,
    n_training_rows: usize,
    gaussian_spread: GaussianSpread,
    min_std: f64,
    parallel: bool,
}

const PRIOR_TOLERANCE: f64 = 1e-9;

fn invalid(reason: impl Into<String>) -> BayesError {
    BayesError::InvalidModel {
        reason: reason.into(),
    }
}

impl TryFrom<RawPoissonModel> for PoissonModel {
    type Error = BayesError;

    fn try_from(raw: RawPoissonModel) -> Result<Self> {
        let n_classes = raw.catalog.len();
        let n_features = raw.attributes.len();
        if n_classes < 2 {
            return Err(BayesError::TooFewClasses { found: n_classes });
        }
        if let Some(attribute) = raw.attributes.iter().find(|a| !a.kind().is_numeric()) {
            return Err(BayesError::UnsupportedAttribute {
                name: attribute.name().to_string(),
                kind: attribute.kind().to_string(),
            });
        }
        if raw.stats.len() != n_features * n_classes {
            return Err(BayesError::dimension_mismatch(
                "stats",
                n_features * n_classes,
                raw.stats.len(),
            ));
        }
        if raw.priors.len() != n_classes {
            return Err(BayesError::dimension_mismatch("priors", n_classes, raw.priors.len()));
        }
        if raw.class_counts.len() != n_classes {
            return Err(BayesError::dimension_mismatch(
                "class_counts",
                n_classes,
                raw.class_counts.len(),
            ));
        }
        if !(raw.min_std.is_finite() && raw.min_std > 0.0) {
            return Err(BayesError::InvalidHyperparameter {
                param: "min_std".to_string(),
                value: raw.min_std.to_string(),
                constraint: "finite and > 0".to_string(),
            });
        }

        let total: u64 = raw.class_counts.iter().sum();
        if raw.n_training_rows == 0 || total != raw.n_training_rows as u64 {
            return Err(invalid(format!(
                "class counts sum to {total} but n_training_rows is {}",
                raw.n_training_rows
            )));
        }
        let observed = raw.class_counts.iter().filter(|&&n| n > 0).count();
        if observed < 2 {
            return Err(BayesError::TooFewClasses { found: observed });
        }
        for (class, (&prior, &count)) in raw.priors.iter().zip(&raw.class_counts).enumerate() {
            let expected = count as f64 / raw.n_training_rows as f64;
            let matches = (prior - expected).abs() <= PRIOR_TOLERANCE;
            if !matches {
                return Err(invalid(format!(
                    "prior {prior} of class {class} does not match {count}/{} training rows",
                    raw.n_training_rows
                )));
            }
        }
        for (i, s) in raw.stats.iter().enumerate() {
            let (feature, class) = (i / n_classes, i % n_classes);
            if s.count != raw.class_counts[class] {
                return Err(invalid(format!(
                    "stats for feature {feature}, class {class} count {} rows, expected {}",
                    s.count, raw.class_counts[class]
                )));
            }
            if !(s.mean.is_finite() && s.std.is_finite() && s.std >= 0.0) {
                return Err(invalid(format!(
                    "stats for feature {feature}, class {class} are not finite with std >= 0"
                )));
            }
        }

        Ok(Self::new(
            raw.attributes,
            raw.catalog,
            raw.stats,
            raw.priors,
            raw.class_counts,
            raw.n_training_rows,
            raw.gaussian_spread,
            raw.min_std,
            raw.parallel,
        ))
    }
}

impl PoissonModel {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        attributes: Vec<Attribute>,
        catalog: ClassCatalog,
        stats: Vec<FeatureStats>,
        priors: Vec<f64>,
        class_counts: Vec<u64>,
        n_training_rows: usize,
        gaussian_spread: GaussianSpread,
        min_std: f64,
        parallel: bool,
    ) -> Self {
        Self {
            attributes,
            catalog,
            stats,
            priors,
            class_counts,
            n_training_rows,
            gaussian_spread,
            min_std,
            parallel,
        }
    }

    /// Class catalog fixed at training time.
    #[must_use]
    pub fn classes(&self) -> &ClassCatalog {
        &self.catalog
    }

    /// Training attributes in feature order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Prior per class index.
    #[must_use]
    pub fn priors(&self) -> &[f64] {
        &self.priors
    }

    /// Training rows per class index.
    #[must_use]
    pub fn class_counts(&self) -> &[u64] {
        &self.class_counts
    }

    /// Number of training rows.
    #[must_use]
    pub fn n_training_rows(&self) -> usize {
        self.n_training_rows
    }

    /// Spread used for the continuous density.
    #[must_use]
    pub fn gaussian_spread(&self) -> GaussianSpread {
        self.gaussian_spread
    }

    /// Mean and std of `feature` within `class`.
    #[must_use]
    pub fn stats(&self, feature: usize, class: usize) -> Option<&FeatureStats> {
        if feature >= self.n_features() || class >= self.n_classes() {
            return None;
        }
        Some(&self.stats[feature * self.n_classes() + class])
    }

    /// Likelihood family and parameters for one value.
    ///
    /// # Panics
    ///
    /// Panics if `feature` or `class` is out of range.
    #[must_use]
    pub fn likelihood(&self, feature: usize, class: usize, value: f64) -> Likelihood {
        let stats = &self.stats[feature * self.n_classes() + class];
        Likelihood::select(value, stats, self.gaussian_spread, self.min_std)
    }

    fn check_arity(&self, row: &[f64]) -> Result<()> {
        if row.len() != self.n_features() {
            return Err(BayesError::dimension_mismatch(
                "features",
                self.n_features(),
                row.len(),
            ));
        }
        Ok(())
    }

    /// Summed log-likelihood per class.
    ///
    /// Non-finite per-feature terms are skipped for that class only.
    ///
    /// # Errors
    ///
    /// Returns an error if the row arity differs from training.
    pub fn log_likelihoods(&self, row: &[f64]) -> Result<Vec<f64>> {
        self.check_arity(row)?;
        let mut totals = vec![0.0; self.n_classes()];
        for (feature, &value) in row.iter().enumerate() {
            for (class, total) in totals.iter_mut().enumerate() {
                match self.likelihood(feature, class, value).log_probability() {
                    Some(lp) => *total += lp,
                    None => trace!(feature, class, value, "skipping non-finite log-likelihood"),
                }
            }
        }
        Ok(totals)
    }

    /// Predicted class value per row.
    ///
    /// # Errors
    ///
    /// Returns an error if the column count differs from training.
    pub fn predict_labels(&self, x: &Matrix<f64>) -> Result<Vec<String>> {
        Ok(self
            .predict(x)?
            .into_iter()
            .map(|p| p.label().to_string())
            .collect())
    }

    /// Confidence vector per row.
    ///
    /// # Errors
    ///
    /// Returns an error if the column count differs from training.
    pub fn predict_proba(&self, x: &Matrix<f64>) -> Result<Vec<Vec<f64>>> {
        Ok(self
            .predict(x)?
            .into_iter()
            .map(|p| p.confidences().to_vec())
            .collect())
    }

    /// Classifies a table, matching columns to training attributes by name.
    ///
    /// Columns the model was not trained on are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a training attribute is absent from the table or
    /// is not numeric there.
    pub fn apply(&self, table: &FeatureTable) -> Result<Vec<Prediction>> {
        let mut columns = Vec::with_capacity(self.attributes.len());
        for attribute in &self.attributes {
            let col = table
                .column_of(attribute.name())
                .ok_or_else(|| BayesError::MissingAttribute {
                    name: attribute.name().to_string(),
                })?;
            let kind = table.attributes()[col].kind();
            if !kind.is_numeric() {
                return Err(BayesError::UnsupportedAttribute {
                    name: attribute.name().to_string(),
                    kind: kind.to_string(),
                });
            }
            columns.push(col);
        }
        self.predict(&table.x().select_columns(&columns)?)
    }
}

impl Classifier for PoissonModel {
    fn n_features(&self) -> usize {
        self.attributes.len()
    }

    fn n_classes(&self) -> usize {
        self.catalog.len()
    }

    fn predict_row(&self, row: &[f64]) -> Result<Prediction> {
        let log_likelihoods = self.log_likelihoods(row)?;
        Ok(Prediction::new(
            self.catalog.shared_values(),
            posterior(&self.priors, &log_likelihoods),
        ))
    }

    fn predict(&self, x: &Matrix<f64>) -> Result<Vec<Prediction>> {
        if x.n_cols() != self.n_features() && !x.is_empty() {
            return Err(BayesError::dimension_mismatch(
                "features",
                self.n_features(),
                x.n_cols(),
            ));
        }
        if self.parallel {
            (0..x.n_rows())
                .into_par_iter()
                .map(|r| self.predict_row(x.row(r)))
                .collect()
        } else {
            x.rows().map(|row| self.predict_row(row)).collect()
        }
    }
}

impl fmt::Display for PoissonModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "PoissonNB({} classes, {} features, {} training rows)",
            self.n_classes(),
            self.n_features(),
            self.n_training_rows
        )?;
        for (class, value) in self.catalog.values().iter().enumerate() {
            writeln!(
                f,
                "class {value}: prior={:.4} rows={}",
                self.priors[class], self.class_counts[class]
            )?;
            for (feature, attribute) in self.attributes.iter().enumerate() {
                let s = &self.stats[feature * self.n_classes() + class];
                if s.is_defined() {
                    writeln!(f, "  {}: mean={:.4} std={:.4}", attribute.name(), s.mean, s.std)?;
                } else {
                    writeln!(f, "  {}: no data", attribute.name())?;
                }
            }
        }
        Ok(())
    }
}
