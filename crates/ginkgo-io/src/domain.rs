//! Domain types for ginkgo-io.

use serde::Serialize;

/// A labeled classification dataset.
///
/// Feature rows and labels are stored in parallel vectors —
/// `features[i]` corresponds to `labels[i]`. Row order is stable and
/// defines the row indices used throughout the pipeline.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Feature values: `features[sample_index][feature_index]`.
    pub(crate) features: Vec<Vec<f64>>,
    /// Class labels, zero-based, aligned with `features`.
    pub(crate) labels: Vec<usize>,
    /// Feature column names from the CSV header.
    pub(crate) feature_names: Vec<String>,
    /// Number of distinct classes (max label + 1).
    pub(crate) n_classes: usize,
}

impl Dataset {
    /// Return the feature matrix (row-major).
    #[must_use]
    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    /// Return the class labels.
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Return the feature column names.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Return the number of samples.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.features.len()
    }

    /// Return the number of feature columns.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Return the number of classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }
}

/// A dataset partitioned into a training and a held-out portion.
///
/// Both portions keep the shuffled order produced by
/// [`HoldoutSplit::split`](crate::HoldoutSplit::split); training row `i`
/// pairs `train_features[i]` with `train_labels[i]`, and likewise for the
/// held-out rows.
#[derive(Debug, Clone)]
pub struct SplitDataset {
    /// Training feature rows.
    pub train_features: Vec<Vec<f64>>,
    /// Training labels, aligned with `train_features`.
    pub train_labels: Vec<usize>,
    /// Held-out feature rows.
    pub test_features: Vec<Vec<f64>>,
    /// Held-out labels, aligned with `test_features`.
    pub test_labels: Vec<usize>,
}

impl SplitDataset {
    /// Return the number of training rows.
    #[must_use]
    pub fn n_train(&self) -> usize {
        self.train_features.len()
    }

    /// Return the number of held-out rows.
    #[must_use]
    pub fn n_test(&self) -> usize {
        self.test_features.len()
    }

    /// Build one [`TestSample`] record per held-out row, in order.
    #[must_use]
    pub fn test_samples(&self) -> Vec<TestSample> {
        self.test_features
            .iter()
            .zip(&self.test_labels)
            .map(|(features, &label)| TestSample {
                features: features.clone(),
                label,
            })
            .collect()
    }
}

/// A held-out row exported alongside the annotated tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestSample {
    /// Feature values of the held-out row.
    pub features: Vec<f64>,
    /// True class label of the held-out row.
    pub label: usize,
}
