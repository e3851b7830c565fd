//! Single-pass estimation of class priors and class-conditional moments.

use crate::data::LabeledRows;
use crate::error::{BayesError, Result};
use crate::stats::{FeatureStats, Moments};

/// Statistics gathered from the training rows.
#[derive(Debug, Clone)]
pub(crate) struct Estimate {
    /// Feature-major: `stats[f * n_classes + c]`.
    pub stats: Vec<FeatureStats>,
    pub class_counts: Vec<u64>,
    pub n_rows: usize,
}

impl Estimate {
    /// `count(class) / total rows`.
    pub fn priors(&self) -> Vec<f64> {
        let total = self.n_rows as f64;
        self.class_counts
            .iter()
            .map(|&n| n as f64 / total)
            .collect()
    }
}

/// Accumulates sums and sums of squares per (feature, class) in one pass.
pub(crate) fn estimate<R: LabeledRows + ?Sized>(rows: &R) -> Result<Estimate> {
    let n_rows = rows.n_rows();
    if n_rows == 0 {
        return Err(BayesError::empty_input("training rows"));
    }
    let n_features = rows.n_features();
    let n_classes = rows.n_classes();

    let mut moments = vec![Moments::new(); n_features * n_classes];
    let mut class_counts = vec![0_u64; n_classes];

    for row in 0..n_rows {
        let class = rows.class_index(row);
        if class >= n_classes {
            return Err(BayesError::DimensionMismatch {
                expected: format!("class index < {n_classes}"),
                actual: format!("{class} in row {row}"),
            });
        }
        let values = rows.features(row);
        if values.len() != n_features {
            return Err(BayesError::DimensionMismatch {
                expected: format!("{n_features} features"),
                actual: format!("{} in row {row}", values.len()),
            });
        }
        class_counts[class] += 1;
        for (feature, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(BayesError::MissingValue { row, feature });
            }
            moments[feature * n_classes + class].push(value);
        }
    }

    let observed = class_counts.iter().filter(|&&n| n > 0).count();
    if observed < 2 {
        return Err(BayesError::TooFewClasses { found: observed });
    }

    Ok(Estimate {
        stats: moments.iter().map(Moments::summarize).collect(),
        class_counts,
        n_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Bare rows + class indices, no table metadata
    struct Rows {
        x: Vec<Vec<f64>>,
        y: Vec<usize>,
        n_classes: usize,
    }

    impl LabeledRows for Rows {
        fn n_rows(&self) -> usize {
            self.x.len()
        }
        fn n_features(&self) -> usize {
            self.x.first().map_or(0, Vec::len)
        }
        fn n_classes(&self) -> usize {
            self.n_classes
        }
        fn features(&self, row: usize) -> &[f64] {
            &self.x[row]
        }
        fn class_index(&self, row: usize) -> usize {
            self.y[row]
        }
    }

    #[test]
    fn test_means_stds_priors() {
        let rows = Rows {
            x: vec![
                vec![1.0, 10.0],
                vec![3.0, 10.0],
                vec![5.0, 20.0],
                vec![7.0, 40.0],
            ],
            y: vec![0, 0, 1, 1],
            n_classes: 2,
        };
        let est = estimate(&rows).expect("valid rows");
        assert_eq!(est.class_counts, vec![2, 2]);
        assert_eq!(est.priors(), vec![0.5, 0.5]);

        // feature 0
        assert_relative_eq!(est.stats[0].mean, 2.0);
        assert_relative_eq!(est.stats[0].std, 1.0);
        assert_relative_eq!(est.stats[1].mean, 6.0);
        // feature 1
        assert_relative_eq!(est.stats[2].mean, 10.0);
        assert_eq!(est.stats[2].std, 0.0);
        assert_relative_eq!(est.stats[3].mean, 30.0);
        assert_relative_eq!(est.stats[3].std, 10.0);
    }

    #[test]
    fn test_empty_class_cell() {
        let rows = Rows {
            x: vec![vec![1.0], vec![2.0], vec![4.0]],
            y: vec![0, 2, 2],
            n_classes: 3,
        };
        let est = estimate(&rows).expect("two classes observed");
        assert_eq!(est.class_counts, vec![1, 0, 2]);
        assert!(!est.stats[1].is_defined());
        assert_eq!(est.priors()[1], 0.0);
    }

    #[test]
    fn test_empty_rows() {
        let rows = Rows {
            x: vec![],
            y: vec![],
            n_classes: 2,
        };
        assert!(matches!(
            estimate(&rows),
            Err(BayesError::EmptyDataset { .. })
        ));
    }

    #[test]
    fn test_ragged_rows() {
        let rows = Rows {
            x: vec![vec![1.0, 2.0], vec![2.0]],
            y: vec![0, 1],
            n_classes: 2,
        };
        assert!(matches!(
            estimate(&rows),
            Err(BayesError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_class_index_out_of_range() {
        let rows = Rows {
            x: vec![vec![1.0], vec![2.0]],
            y: vec![0, 5],
            n_classes: 2,
        };
        assert!(estimate(&rows).is_err());
    }

    #[test]
    fn test_non_finite_value() {
        let rows = Rows {
            x: vec![vec![1.0], vec![f64::INFINITY]],
            y: vec![0, 1],
            n_classes: 2,
        };
        assert!(matches!(
            estimate(&rows),
            Err(BayesError::MissingValue { row: 1, feature: 0 })
        ));
    }

    #[test]
    fn test_single_observed_class() {
        let rows = Rows {
            x: vec![vec![1.0], vec![2.0]],
            y: vec![1, 1],
            n_classes: 2,
        };
        assert!(matches!(
            estimate(&rows),
            Err(BayesError::TooFewClasses { found: 1 })
        ));
    }
}
