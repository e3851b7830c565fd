//! Error types for training and prediction.
//!
//! Only invalid input is an error. Degenerate class statistics and
//! non-finite per-feature likelihoods are recovered inside the classifier.

use thiserror::Error;

/// Main error type for `poisson_bayes` operations.
///
/// # Examples
///
/// ```
/// use poisson_bayes::error::BayesError;
///
/// let err = BayesError::TooFewClasses { found: 1 };
/// assert!(err.to_string().contains("at least 2"));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BayesError {
    /// The dataset has no rows.
    #[error("empty dataset: {context}")]
    EmptyDataset {
        /// Where the empty input was found
        context: String,
    },

    /// Feature arity or row count disagreement.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Fewer than two distinct label values were observed.
    #[error("need at least 2 distinct classes, found {found}")]
    TooFewClasses {
        /// Number of distinct classes observed
        found: usize,
    },

    /// A feature attribute is not numeric.
    #[error("attribute '{name}' has unsupported type {kind}")]
    UnsupportedAttribute {
        /// Attribute name
        name: String,
        /// Attribute type
        kind: String,
    },

    /// The label type is not accepted by the learner.
    #[error("label type {kind} is not supported")]
    UnsupportedLabel {
        /// Label type
        kind: String,
    },

    /// A training feature value is missing (NaN) or not finite.
    #[error("missing value at row {row}, feature {feature}")]
    MissingValue {
        /// Row index
        row: usize,
        /// Feature index
        feature: usize,
    },

    /// A label value is not part of the class catalog.
    #[error("label '{label}' is not in the class catalog")]
    UnknownLabel {
        /// Offending label
        label: String,
    },

    /// The same class value was listed twice.
    #[error("duplicate class value '{label}'")]
    DuplicateClass {
        /// Offending label
        label: String,
    },

    /// A prediction table lacks an attribute the model was trained on.
    #[error("attribute '{name}' required by the model is missing")]
    MissingAttribute {
        /// Attribute name
        name: String,
    },

    /// A restored model violates its own invariants.
    #[error("invalid model: {reason}")]
    InvalidModel {
        /// Violated invariant
        reason: String,
    },

    /// Invalid hyperparameter value provided.
    #[error("invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },
}

impl BayesError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::EmptyDataset {
            context: context.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, BayesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = BayesError::dimension_mismatch("features", 3, 2);
        let msg = err.to_string();
        assert!(msg.contains("dimension mismatch"));
        assert!(msg.contains("features=3"));
        assert!(msg.ends_with("got 2"));
    }

    #[test]
    fn test_empty_input_display() {
        let err = BayesError::empty_input("training rows");
        assert_eq!(err.to_string(), "empty dataset: training rows");
    }

    #[test]
    fn test_missing_value_display() {
        let err = BayesError::MissingValue { row: 4, feature: 1 };
        assert_eq!(err.to_string(), "missing value at row 4, feature 1");
    }

    #[test]
    fn test_unsupported_attribute_display() {
        let err = BayesError::UnsupportedAttribute {
            name: "color".to_string(),
            kind: "polynominal".to_string(),
        };
        assert!(err.to_string().contains("'color'"));
        assert!(err.to_string().contains("polynominal"));
    }

    #[test]
    fn test_invalid_model_display() {
        let err = BayesError::InvalidModel {
            reason: "priors do not match class counts".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid model: priors do not match class counts"
        );
    }

    #[test]
    fn test_invalid_hyperparameter_display() {
        let err = BayesError::InvalidHyperparameter {
            param: "min_std".to_string(),
            value: "0".to_string(),
            constraint: "finite and > 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid hyperparameter: min_std = 0, expected finite and > 0"
        );
    }
}
