//! Deterministic holdout splitting of a dataset.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::{info, instrument};

use crate::IoError;
use crate::domain::{Dataset, SplitDataset};

/// Configuration for a shuffled holdout split.
///
/// Construct via [`HoldoutSplit::new`], then chain `with_seed` if desired.
/// The default seed is 42.
#[derive(Debug, Clone)]
pub struct HoldoutSplit {
    test_fraction: f64,
    seed: u64,
}

impl HoldoutSplit {
    /// Create a new holdout split reserving `test_fraction` of the rows.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidTestFraction`] if `test_fraction` is not
    /// strictly between 0 and 1.
    pub fn new(test_fraction: f64) -> Result<Self, IoError> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(IoError::InvalidTestFraction {
                fraction: test_fraction,
            });
        }
        Ok(Self {
            test_fraction,
            seed: 42,
        })
    }

    /// Set the random seed for the shuffle.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Return the held-out fraction.
    #[must_use]
    pub fn test_fraction(&self) -> f64 {
        self.test_fraction
    }

    /// Return the random seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Partition the dataset into training and held-out portions.
    ///
    /// Row indices are shuffled with a seeded `ChaCha8Rng`; the first
    /// `ceil(n * test_fraction)` shuffled rows are held out and the rest
    /// become the training portion. Both portions keep the shuffled order,
    /// so the same seed always yields the same partition in the same order.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DegenerateSplit`] when either portion would be
    /// empty (including the zero-sample dataset).
    #[instrument(skip_all, fields(n_samples = dataset.n_samples(), seed = self.seed))]
    pub fn split(&self, dataset: &Dataset) -> Result<SplitDataset, IoError> {
        let n = dataset.n_samples();
        let n_test = (n as f64 * self.test_fraction).ceil() as usize;
        if n_test == 0 || n_test >= n {
            return Err(IoError::DegenerateSplit {
                n_samples: n,
                n_test,
            });
        }

        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        indices.shuffle(&mut rng);

        let (test_idx, train_idx) = indices.split_at(n_test);

        let features = dataset.features();
        let labels = dataset.labels();

        let split = SplitDataset {
            train_features: train_idx.iter().map(|&i| features[i].clone()).collect(),
            train_labels: train_idx.iter().map(|&i| labels[i]).collect(),
            test_features: test_idx.iter().map(|&i| features[i].clone()).collect(),
            test_labels: test_idx.iter().map(|&i| labels[i]).collect(),
        };

        info!(
            n_train = split.n_train(),
            n_test = split.n_test(),
            "dataset split"
        );

        Ok(split)
    }
}
