//! Poisson naive Bayes: a classifier for numeric, count-like features.
//!
//! Training derives class priors and, per class and feature, the mean and
//! population standard deviation. Prediction scores each feature value as
//! a Poisson count (values below 500) or under a Normal density (values of
//! 500 and above), sums the log-likelihoods per class, and turns them into
//! normalized confidences with a single winning class.
//!
//! # Quick Start
//!
//! ```
//! use poisson_bayes::prelude::*;
//!
//! let data = LabeledDataset::from_rows(
//!     &[vec![1.0, 0.0], vec![2.0, 1.0], vec![8.0, 6.0], vec![9.0, 7.0]],
//!     &["quiet", "quiet", "busy", "busy"],
//! ).expect("rows and labels line up");
//!
//! let model = PoissonNB::new().fit(&data).expect("two classes");
//! let p = model.predict_row(&[8.0, 5.0]).expect("two features");
//! assert_eq!(p.label(), "busy");
//! assert!((p.confidences().iter().sum::<f64>() - 1.0).abs() < 1e-9);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Row-major `Matrix`
//! - [`data`]: Attributes, labeled datasets and the class catalog
//! - [`stats`]: Mergeable moment accumulators
//! - [`classification`]: `PoissonNB` learner and `PoissonModel`
//! - [`traits`]: `Learner` and `Classifier` seams
//!
//! # Logging
//!
//! Events are emitted through [`tracing`]; install a subscriber to see them.

pub mod classification;
pub mod data;
pub mod error;
pub mod prelude;
pub mod primitives;
pub mod stats;
pub mod traits;

pub use error::{BayesError, Result};
