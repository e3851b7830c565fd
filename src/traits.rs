//! Core traits for learners and the classifiers they produce.
//!
//! A [`Learner`] declares which data shapes it accepts and builds a model;
//! a [`Classifier`] turns feature rows into predictions.

use crate::classification::Prediction;
use crate::data::{Attribute, LabeledDataset};
use crate::error::{BayesError, Result};
use crate::primitives::Matrix;

/// Data shapes a learner may accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Integer or real feature attributes.
    NumericalAttributes,
    /// Nominal feature attributes.
    NominalAttributes,
    /// Label with exactly two classes.
    BinominalLabel,
    /// Label with more than two classes.
    PolynominalLabel,
    /// Numeric (regression) label.
    NumericalLabel,
    /// Missing feature values.
    MissingValues,
}

/// Builds a model from a labeled dataset.
///
/// # Examples
///
/// ```
/// use poisson_bayes::prelude::*;
///
/// let nb = PoissonNB::new();
/// assert!(nb.supports(Capability::NumericalAttributes));
/// assert!(!nb.supports(Capability::MissingValues));
/// ```
pub trait Learner {
    /// Trained model type.
    type Model;

    /// Returns `true` if the learner accepts data with this capability.
    fn supports(&self, capability: Capability) -> bool;

    /// Rejects attributes whose type the learner does not accept.
    ///
    /// # Errors
    ///
    /// Returns an error for the first unsupported attribute.
    fn check_attributes(&self, attributes: &[Attribute]) -> Result<()> {
        for attribute in attributes {
            let kind = attribute.kind();
            let accepted = (kind.is_numeric() && self.supports(Capability::NumericalAttributes))
                || (kind.is_nominal() && self.supports(Capability::NominalAttributes));
            if !accepted {
                return Err(BayesError::UnsupportedAttribute {
                    name: attribute.name().to_string(),
                    kind: kind.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Rejects a dataset the learner cannot handle, before any training.
    ///
    /// # Errors
    ///
    /// Returns an error for an unsupported attribute type, a missing value
    /// when missing values are unsupported, or an unsupported label type.
    fn check_capabilities(&self, data: &LabeledDataset) -> Result<()> {
        self.check_attributes(data.attributes())?;

        if !self.supports(Capability::MissingValues) {
            if let Some((row, feature)) = data.first_missing() {
                return Err(BayesError::MissingValue { row, feature });
            }
        }

        let n_classes = data.catalog().len();
        if n_classes < 2 {
            return Err(BayesError::TooFewClasses { found: n_classes });
        }
        let (label, kind) = if n_classes == 2 {
            (Capability::BinominalLabel, "binominal")
        } else {
            (Capability::PolynominalLabel, "polynominal")
        };
        if !self.supports(label) {
            return Err(BayesError::UnsupportedLabel {
                kind: kind.to_string(),
            });
        }
        Ok(())
    }

    /// Trains a model.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset is rejected or cannot be fitted.
    fn learn(&self, data: &LabeledDataset) -> Result<Self::Model>;
}

/// A trained classifier over fixed-arity numeric rows.
pub trait Classifier {
    /// Feature arity expected by [`Classifier::predict_row`].
    fn n_features(&self) -> usize;

    /// Number of classes in the confidence vector.
    fn n_classes(&self) -> usize;

    /// Classifies one row.
    ///
    /// # Errors
    ///
    /// Returns an error if the row arity differs from [`Classifier::n_features`].
    fn predict_row(&self, row: &[f64]) -> Result<Prediction>;

    /// Classifies every row of a matrix, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the column count differs from
    /// [`Classifier::n_features`].
    fn predict(&self, x: &Matrix<f64>) -> Result<Vec<Prediction>> {
        x.rows().map(|row| self.predict_row(row)).collect()
    }
}
