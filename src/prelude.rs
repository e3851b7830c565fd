//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use poisson_bayes::prelude::*;
//! ```

pub use crate::classification::{GaussianSpread, PoissonModel, PoissonNB, Prediction};
pub use crate::data::{Attribute, AttributeKind, ClassCatalog, FeatureTable, LabeledDataset};
pub use crate::error::BayesError;
pub use crate::primitives::Matrix;
pub use crate::traits::{Capability, Classifier, Learner};
