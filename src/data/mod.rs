//! Labeled and unlabeled tables of numeric features.
//!
//! Attribute metadata travels with the values so a learner can check its
//! capabilities before training. The estimator itself only sees the
//! narrow [`LabeledRows`] view: numeric rows plus class indices.

mod catalog;

pub use catalog::ClassCatalog;

use crate::error::{BayesError, Result};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value type of an attribute (column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Whole numbers (counts).
    Integer,
    /// Real numbers.
    Real,
    /// Nominal with two values, index-encoded.
    Binominal,
    /// Nominal with more than two values, index-encoded.
    Polynominal,
    /// Free text, index-encoded.
    Text,
    /// Timestamps as epoch values.
    DateTime,
}

impl AttributeKind {
    /// Returns `true` for numeric kinds.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Real)
    }

    /// Returns `true` for nominal kinds.
    #[must_use]
    pub fn is_nominal(self) -> bool {
        matches!(self, Self::Binominal | Self::Polynominal | Self::Text)
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Binominal => "binominal",
            Self::Polynominal => "polynominal",
            Self::Text => "text",
            Self::DateTime => "date_time",
        };
        f.write_str(name)
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
}

impl Attribute {
    /// Creates an attribute.
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Creates a real-valued attribute.
    pub fn real(name: impl Into<String>) -> Self {
        Self::new(name, AttributeKind::Real)
    }

    /// Creates an integer attribute.
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, AttributeKind::Integer)
    }

    /// Attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute type.
    #[must_use]
    pub fn kind(&self) -> AttributeKind {
        self.kind
    }
}

/// Default attribute names `att1..attN`, all real-valued.
fn default_attributes(n: usize) -> Vec<Attribute> {
    (1..=n).map(|i| Attribute::real(format!("att{i}"))).collect()
}

fn check_attribute_count(attributes: &[Attribute], x: &Matrix<f64>) -> Result<()> {
    if attributes.len() != x.n_cols() {
        return Err(BayesError::dimension_mismatch(
            "attributes",
            x.n_cols(),
            attributes.len(),
        ));
    }
    Ok(())
}

/// Row access needed to estimate class-conditional statistics.
///
/// Every row has exactly `n_features()` values and a class index below
/// `n_classes()`.
pub trait LabeledRows {
    /// Number of rows.
    fn n_rows(&self) -> usize;

    /// Feature arity shared by all rows.
    fn n_features(&self) -> usize;

    /// Number of classes in the label mapping.
    fn n_classes(&self) -> usize;

    /// Feature values of a row.
    fn features(&self, row: usize) -> &[f64];

    /// Class index of a row.
    fn class_index(&self, row: usize) -> usize;
}

/// Rows of numeric features, each with one categorical label.
///
/// # Examples
///
/// ```
/// use poisson_bayes::data::LabeledDataset;
///
/// let data = LabeledDataset::from_rows(
///     &[vec![2.0, 5.0], vec![20.0, 50.0]],
///     &["A", "B"],
/// ).expect("rows and labels line up");
/// assert_eq!(data.catalog().len(), 2);
/// assert_eq!(data.attributes()[1].name(), "att2");
/// ```
#[derive(Debug, Clone)]
pub struct LabeledDataset {
    attributes: Vec<Attribute>,
    x: Matrix<f64>,
    class_indices: Vec<usize>,
    catalog: ClassCatalog,
}

impl LabeledDataset {
    /// Creates a dataset, deriving the class catalog from the labels.
    ///
    /// # Errors
    ///
    /// Returns an error if attribute count, column count and label count
    /// disagree.
    pub fn new<S: AsRef<str>>(
        attributes: Vec<Attribute>,
        x: Matrix<f64>,
        labels: &[S],
    ) -> Result<Self> {
        let catalog = ClassCatalog::from_labels(labels);
        Self::with_catalog(attributes, x, labels, catalog)
    }

    /// Creates a dataset with an explicit class catalog.
    ///
    /// Classes listed in the catalog need not occur in the rows.
    ///
    /// # Errors
    ///
    /// Returns an error on shape disagreement or a label missing from the
    /// catalog.
    pub fn with_catalog<S: AsRef<str>>(
        attributes: Vec<Attribute>,
        x: Matrix<f64>,
        labels: &[S],
        catalog: ClassCatalog,
    ) -> Result<Self> {
        check_attribute_count(&attributes, &x)?;
        if labels.len() != x.n_rows() {
            return Err(BayesError::dimension_mismatch(
                "labels",
                x.n_rows(),
                labels.len(),
            ));
        }
        let class_indices = catalog.encode(labels)?;
        Ok(Self {
            attributes,
            x,
            class_indices,
            catalog,
        })
    }

    /// Creates a dataset from feature rows with default real attributes.
    ///
    /// # Errors
    ///
    /// Returns an error if rows have different lengths or the label count
    /// differs from the row count.
    pub fn from_rows<R: AsRef<[f64]>, S: AsRef<str>>(rows: &[R], labels: &[S]) -> Result<Self> {
        let x = Matrix::from_rows(rows)?;
        Self::new(default_attributes(x.n_cols()), x, labels)
    }

    /// Feature attributes in column order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Feature matrix.
    #[must_use]
    pub fn x(&self) -> &Matrix<f64> {
        &self.x
    }

    /// Class index of every row.
    #[must_use]
    pub fn class_indices(&self) -> &[usize] {
        &self.class_indices
    }

    /// Label mapping.
    #[must_use]
    pub fn catalog(&self) -> &ClassCatalog {
        &self.catalog
    }

    /// Label value of a row.
    #[must_use]
    pub fn label(&self, row: usize) -> Option<&str> {
        self.class_indices
            .get(row)
            .and_then(|&c| self.catalog.value(c))
    }

    /// Returns the first missing or non-finite value as `(row, feature)`.
    #[must_use]
    pub fn first_missing(&self) -> Option<(usize, usize)> {
        self.x
            .as_slice()
            .iter()
            .position(|v| !v.is_finite())
            .map(|i| (i / self.x.n_cols(), i % self.x.n_cols()))
    }
}

impl LabeledRows for LabeledDataset {
    fn n_rows(&self) -> usize {
        self.x.n_rows()
    }

    fn n_features(&self) -> usize {
        self.x.n_cols()
    }

    fn n_classes(&self) -> usize {
        self.catalog.len()
    }

    fn features(&self, row: usize) -> &[f64] {
        self.x.row(row)
    }

    fn class_index(&self, row: usize) -> usize {
        self.class_indices[row]
    }
}

/// Unlabeled rows to be classified.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    attributes: Vec<Attribute>,
    x: Matrix<f64>,
}

impl FeatureTable {
    /// Creates a table.
    ///
    /// # Errors
    ///
    /// Returns an error if the attribute count differs from the column count.
    pub fn new(attributes: Vec<Attribute>, x: Matrix<f64>) -> Result<Self> {
        check_attribute_count(&attributes, &x)?;
        Ok(Self { attributes, x })
    }

    /// Creates a table from rows with default real attributes.
    ///
    /// # Errors
    ///
    /// Returns an error if rows have different lengths.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let x = Matrix::from_rows(rows)?;
        Self::new(default_attributes(x.n_cols()), x)
    }

    /// Attributes in column order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Feature matrix.
    #[must_use]
    pub fn x(&self) -> &Matrix<f64> {
        &self.x
    }

    /// Column index of an attribute by name.
    #[must_use]
    pub fn column_of(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name() == name)
    }
}
