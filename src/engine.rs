//! Detection engine facade.
//!
//! Wires the forward pipeline together: simulate telemetry, fit the
//! isolation forest and score every sample, label the top fraction by
//! rank, and reduce the labels into one [`DetectionResult`]. All
//! configuration is validated up front, before any data is generated,
//! so an invalid request never produces a partial result.

use crate::detect::label_top_fraction;
use crate::error::{CentinelaError, Result};
use crate::forest::{IsolationForest, DEFAULT_N_TREES, DEFAULT_SUBSAMPLE_SIZE};
use crate::report::DetectionResult;
use crate::simulate::TelemetrySimulator;

/// Default contamination ratio: the assumed anomalous fraction.
pub const DEFAULT_CONTAMINATION: f32 = 0.05;

/// One-shot anomaly detection engine over simulated sensor telemetry.
///
/// # Examples
///
/// ```
/// use centinela::engine::DetectionEngine;
///
/// let result = DetectionEngine::new()
///     .with_n_trees(25)
///     .with_random_state(42)
///     .run(200)
///     .unwrap();
/// assert_eq!(result.total_samples, 200);
/// assert_eq!(result.anomaly_count, 10);
/// ```
#[derive(Debug, Clone)]
pub struct DetectionEngine {
    contamination: f32,
    n_trees: usize,
    subsample_size: usize,
    random_state: Option<u64>,
}

impl DetectionEngine {
    /// Creates an engine with defaults: contamination 0.05, 100 trees,
    /// subsample size 256, entropy-seeded randomness.
    #[must_use]
    pub fn new() -> Self {
        Self {
            contamination: DEFAULT_CONTAMINATION,
            n_trees: DEFAULT_N_TREES,
            subsample_size: DEFAULT_SUBSAMPLE_SIZE,
            random_state: None,
        }
    }

    /// Sets the contamination ratio.
    #[must_use]
    pub fn with_contamination(mut self, contamination: f32) -> Self {
        self.contamination = contamination;
        self
    }

    /// Sets the number of trees in the forest.
    #[must_use]
    pub fn with_n_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees;
        self
    }

    /// Sets the per-tree subsample size (clamped to the dataset size).
    #[must_use]
    pub fn with_subsample_size(mut self, subsample_size: usize) -> Self {
        self.subsample_size = subsample_size;
        self
    }

    /// Sets the master random state. The simulator and every tree
    /// derive their own independent streams from it.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    /// Runs one full detection pass over `n_samples` freshly simulated
    /// readings and returns the summary record.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` if `n_samples < 2`, the
    /// contamination ratio is outside (0, 1), the tree count is 0, or
    /// the subsample size is below 2. Validation happens before any
    /// computation.
    pub fn run(&self, n_samples: usize) -> Result<DetectionResult> {
        self.validate(n_samples)?;

        let mut simulator = TelemetrySimulator::new()
            .with_n_samples(n_samples)
            .with_anomaly_ratio(self.contamination);
        if let Some(seed) = self.random_state {
            simulator = simulator.with_random_state(seed);
        }
        let dataset = simulator.generate()?;

        let mut forest = IsolationForest::new()
            .with_n_trees(self.n_trees)
            .with_subsample_size(self.subsample_size);
        if let Some(seed) = self.random_state {
            // Offset keeps the per-tree streams disjoint from the
            // simulator's stream.
            forest = forest.with_random_state(seed.wrapping_add(1));
        }
        let scores = forest.fit_predict(&dataset)?;

        let labels = label_top_fraction(&scores, self.contamination)?;
        Ok(DetectionResult::from_labels(&labels))
    }

    fn validate(&self, n_samples: usize) -> Result<()> {
        if n_samples < 2 {
            return Err(CentinelaError::invalid_hyperparameter(
                "n_samples",
                n_samples,
                ">= 2",
            ));
        }
        if !(self.contamination > 0.0 && self.contamination < 1.0) {
            return Err(CentinelaError::invalid_hyperparameter(
                "contamination",
                self.contamination,
                "in (0, 1)",
            ));
        }
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
        Ok(())
    }
}

impl Default for DetectionEngine {
    fn default() -> Self {
        Self::new()
    }
}
