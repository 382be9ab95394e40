//! Isolation forest: ensemble anomaly scoring from average path length.
//!
//! The forest trains T independent [`IsolationTree`]s, each on its own
//! without-replacement subsample of size psi, and scores a sample as
//! `2^(-E[h(x)] / c(psi))` where `E[h(x)]` is the mean path length
//! across trees and `c` the unsuccessful-search correction. Scores fall
//! in (0, 1]; values near 1 mean short average paths (anomalous),
//! values at or below 0.5 mean normal.
//!
//! Training and scoring are separate phases so each can be tested on
//! its own; [`IsolationForest::fit_predict`] remains as a convenience
//! wrapper over the two.
//!
//! # Examples
//!
//! ```
//! use centinela::forest::IsolationForest;
//! use centinela::simulate::TelemetrySimulator;
//!
//! let data = TelemetrySimulator::new()
//!     .with_n_samples(300)
//!     .with_random_state(7)
//!     .generate()
//!     .unwrap();
//!
//! let mut forest = IsolationForest::new()
//!     .with_n_trees(25)
//!     .with_random_state(7);
//! let scores = forest.fit_predict(&data).unwrap();
//! assert_eq!(scores.len(), 300);
//! assert!(scores.iter().all(|&s| s > 0.0 && s <= 1.0));
//! ```

mod tree;

pub use tree::IsolationTree;

pub(crate) use tree::average_path_length;

use crate::error::{CentinelaError, Result};
use crate::telemetry::{SensorDataset, SensorSample};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Default number of trees in the ensemble.
pub const DEFAULT_N_TREES: usize = 100;

/// Default subsample size per tree (clamped to the dataset size at fit).
pub const DEFAULT_SUBSAMPLE_SIZE: usize = 256;

/// Ensemble of independently built isolation trees.
#[derive(Debug, Clone)]
pub struct IsolationForest {
    trees: Vec<IsolationTree>,
    n_trees: usize,
    subsample_size: usize,
    /// Subsample size actually used at fit time (clamped to dataset size)
    effective_subsample: usize,
    random_state: Option<u64>,
}

impl IsolationForest {
    /// Creates an unfitted forest with defaults: 100 trees, subsample
    /// size 256, entropy-seeded randomness.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trees: Vec::new(),
            n_trees: DEFAULT_N_TREES,
            subsample_size: DEFAULT_SUBSAMPLE_SIZE,
            effective_subsample: 0,
            random_state: None,
        }
    }

    /// Sets the number of trees.
    #[must_use]
    pub fn with_n_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees;
        self
    }

    /// Sets the per-tree subsample size.
    #[must_use]
    pub fn with_subsample_size(mut self, subsample_size: usize) -> Self {
        self.subsample_size = subsample_size;
        self
    }

    /// Sets the random state for reproducibility. Tree `i` draws from
    /// its own stream seeded with `random_state + i`.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    /// Returns the number of trees built by the last `fit`.
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Trains the ensemble on `data`.
    ///
    /// Trees are independent, so they are built in parallel; each one
    /// owns a private RNG stream to keep the trees statistically
    /// independent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` if the forest has no trees, the
    /// subsample size is below 2, or the dataset holds fewer than 2
    /// samples.
    pub fn fit(&mut self, data: &SensorDataset) -> Result<()> {
        if self.n_trees < 1 {
            return Err(CentinelaError::invalid_hyperparameter(
                "n_trees",
                self.n_trees,
                ">= 1",
            ));
        }
        if self.subsample_size < 2 {
            return Err(CentinelaError::invalid_hyperparameter(
                "subsample_size",
                self.subsample_size,
                ">= 2",
            ));
        }
        if data.len() < 2 {
            return Err(CentinelaError::invalid_hyperparameter(
                "dataset size",
                data.len(),
                ">= 2",
            ));
        }

        let psi = self.subsample_size.min(data.len());
        let random_state = self.random_state;

        self.trees = (0..self.n_trees)
            .into_par_iter()
            .map(|i| {
                let mut rng = match random_state {
                    Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(i as u64)),
                    None => StdRng::from_entropy(),
                };
                let subsample = draw_subsample(data, psi, &mut rng);
                IsolationTree::fit(&subsample, &mut rng)
            })
            .collect();
        self.effective_subsample = psi;

        Ok(())
    }

    /// Scores every sample in `data`; each score is in (0, 1].
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` if called before `fit`.
    pub fn score_samples(&self, data: &SensorDataset) -> Result<Vec<f32>> {
        if self.trees.is_empty() {
            return Err(CentinelaError::not_fitted("IsolationForest"));
        }
        Ok(data
            .samples()
            .par_iter()
            .map(|s| self.score_sample(s))
            .collect())
    }

    /// Scores a single sample against the fitted ensemble.
    ///
    /// Returns the normalized anomaly score, or `NotFitted` before `fit`.
    pub fn score_sample_checked(&self, sample: &SensorSample) -> Result<f32> {
        if self.trees.is_empty() {
            return Err(CentinelaError::not_fitted("IsolationForest"));
        }
        Ok(self.score_sample(sample))
    }

    /// Fits the forest and scores the training data in one call.
    ///
    /// # Errors
    ///
    /// Propagates the `fit` validation errors.
    pub fn fit_predict(&mut self, data: &SensorDataset) -> Result<Vec<f32>> {
        self.fit(data)?;
        self.score_samples(data)
    }

    fn score_sample(&self, sample: &SensorSample) -> f32 {
        let total: f32 = self.trees.iter().map(|t| t.path_length(sample)).sum();
        let mean_path = total / self.trees.len() as f32;
        let norm = average_path_length(self.effective_subsample);
        2.0_f32.powf(-mean_path / norm)
    }
}

impl Default for IsolationForest {
    fn default() -> Self {
        Self::new()
    }
}

/// Draws `psi` samples without replacement via a partial Fisher-Yates
/// pass over the index range.
fn draw_subsample(data: &SensorDataset, psi: usize, rng: &mut StdRng) -> Vec<SensorSample> {
    let n = data.len();
    let mut indices: Vec<usize> = (0..n).collect();
    for i in 0..psi {
        let j = rng.gen_range(i..n);
        indices.swap(i, j);
    }
    indices[..psi].iter().map(|&i| data.get(i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulate::TelemetrySimulator;
    use crate::telemetry::SensorSample;

    fn dataset(n: usize, seed: u64) -> SensorDataset {
        TelemetrySimulator::new()
            .with_n_samples(n)
            .with_random_state(seed)
            .generate()
            .expect("generate should succeed")
    }

    #[test]
    fn test_fit_builds_requested_trees() {
        let data = dataset(100, 1);
        let mut forest = IsolationForest::new().with_n_trees(17).with_random_state(1);
        forest.fit(&data).expect("fit should succeed");
        assert_eq!(forest.n_trees(), 17);
    }

    #[test]
    fn test_scores_are_in_unit_interval() {
        let data = dataset(300, 2);
        let mut forest = IsolationForest::new().with_n_trees(50).with_random_state(2);
        let scores = forest.fit_predict(&data).expect("fit_predict should succeed");
        assert_eq!(scores.len(), data.len());
        for &s in &scores {
            assert!(s > 0.0 && s <= 1.0, "score {s} outside (0, 1]");
        }
    }

    #[test]
    fn test_score_before_fit_is_rejected() {
        let data = dataset(50, 3);
        let forest = IsolationForest::new();
        let err = forest
            .score_samples(&data)
            .expect_err("unfitted forest must not score");
        assert!(matches!(err, CentinelaError::NotFitted { .. }));
    }

    #[test]
    fn test_zero_trees_rejected() {
        let data = dataset(50, 4);
        let mut forest = IsolationForest::new().with_n_trees(0);
        let err = forest.fit(&data).expect_err("0 trees must be rejected");
        assert!(matches!(err, CentinelaError::InvalidHyperparameter { .. }));
    }

    #[test]
    fn test_subsample_below_two_rejected() {
        let data = dataset(50, 5);
        let mut forest = IsolationForest::new().with_subsample_size(1);
        let err = forest.fit(&data).expect_err("psi < 2 must be rejected");
        assert!(matches!(err, CentinelaError::InvalidHyperparameter { .. }));
    }

    #[test]
    fn test_subsample_clamped_to_dataset_size() {
        // 40 samples with the default psi = 256: fit must clamp, not fail.
        let data = dataset(40, 6);
        let mut forest = IsolationForest::new().with_n_trees(10).with_random_state(6);
        let scores = forest.fit_predict(&data).expect("clamped fit should succeed");
        assert_eq!(scores.len(), 40);
    }

    #[test]
    fn test_seeded_forest_is_deterministic() {
        let data = dataset(150, 7);
        let mut a = IsolationForest::new().with_n_trees(20).with_random_state(7);
        let mut b = IsolationForest::new().with_n_trees(20).with_random_state(7);
        let sa = a.fit_predict(&data).expect("fit_predict should succeed");
        let sb = b.fit_predict(&data).expect("fit_predict should succeed");
        assert_eq!(sa, sb, "same seed should give identical scores");
    }

    #[test]
    fn test_boundary_two_samples_one_tree() {
        let data = dataset(2, 8);
        let mut forest = IsolationForest::new()
            .with_n_trees(1)
            .with_subsample_size(2)
            .with_random_state(8);
        let scores = forest.fit_predict(&data).expect("minimal config must work");
        assert_eq!(scores.len(), 2);
        for &s in &scores {
            assert!(s > 0.0 && s <= 1.0);
        }
    }

    #[test]
    fn test_extreme_sample_scores_higher_than_typical() {
        let data = dataset(400, 9);
        let mut forest = IsolationForest::new().with_n_trees(100).with_random_state(9);
        forest.fit(&data).expect("fit should succeed");

        // Channel-wise mean as a stand-in for a typical reading.
        let n = data.len() as f32;
        let mean = SensorSample::new(
            data.iter().map(|s| s.temperature).sum::<f32>() / n,
            data.iter().map(|s| s.vibration).sum::<f32>() / n,
            data.iter().map(|s| s.pressure).sum::<f32>() / n,
        );
        let extreme = SensorSample::new(
            mean.temperature + 60.0,
            mean.vibration + 2.0,
            mean.pressure - 80.0,
        );

        let typical_score = forest
            .score_sample_checked(&mean)
            .expect("scoring should succeed");
        let extreme_score = forest
            .score_sample_checked(&extreme)
            .expect("scoring should succeed");
        assert!(
            extreme_score > typical_score,
            "extreme {extreme_score} should outscore typical {typical_score}"
        );
    }
}
