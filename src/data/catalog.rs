//! Class value to index mapping.

use crate::error::{BayesError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Stable bijection between class values and indices `0..C`.
///
/// Built from label values in first-occurrence order, the same order a
/// nominal label mapping assigns indices in. An explicit catalog may list
/// classes that never appear in the training rows.
///
/// # Examples
///
/// ```
/// use poisson_bayes::data::ClassCatalog;
///
/// let catalog = ClassCatalog::from_labels(["spam", "ham", "spam"]);
/// assert_eq!(catalog.values(), &["spam".to_string(), "ham".to_string()]);
/// assert_eq!(catalog.index_of("ham"), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawClassCatalog")]
pub struct ClassCatalog {
    values: Arc<[String]>,
}

/// Unchecked serialized form of [`ClassCatalog`].
#[derive(Deserialize)]
struct RawClassCatalog {
    values: Vec<String>,
}

impl TryFrom<RawClassCatalog> for ClassCatalog {
    type Error = BayesError;

    fn try_from(raw: RawClassCatalog) -> Result<Self> {
        Self::from_values(raw.values)
    }
}

impl ClassCatalog {
    /// Derives the catalog from labels, keeping first-occurrence order.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values: Vec<String> = Vec::new();
        for label in labels {
            let label = label.as_ref();
            if !values.iter().any(|v| v == label) {
                values.push(label.to_string());
            }
        }
        Self {
            values: values.into(),
        }
    }

    /// Creates a catalog from an explicit, ordered list of class values.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is listed twice.
    pub fn from_values<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if out.contains(&value) {
                return Err(BayesError::DuplicateClass { label: value });
            }
            out.push(value);
        }
        Ok(Self { values: out.into() })
    }

    /// Number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the catalog holds no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Index of a class value.
    #[must_use]
    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    /// Class value at an index.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// All class values in index order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub(crate) fn shared_values(&self) -> Arc<[String]> {
        Arc::clone(&self.values)
    }

    /// Maps every label to its class index.
    ///
    /// # Errors
    ///
    /// Returns an error for the first label not in the catalog.
    pub fn encode<S: AsRef<str>>(&self, labels: &[S]) -> Result<Vec<usize>> {
        labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                self.index_of(label).ok_or_else(|| BayesError::UnknownLabel {
                    label: label.to_string(),
                })
            })
            .collect()
    }
}
