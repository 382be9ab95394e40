//! Synthetic sensor telemetry simulator.
//!
//! Produces a [`SensorDataset`] with per-run random baselines, Gaussian
//! channel noise, a slow sinusoidal cycle, uniform jitter, and a hidden
//! set of injected anomalies. The injected indices are not retained:
//! the detector must rediscover them statistically. Sample order is
//! randomly permuted at the end so position carries no signal.
//!
//! # Examples
//!
//! ```
//! use centinela::simulate::TelemetrySimulator;
//!
//! let data = TelemetrySimulator::new()
//!     .with_n_samples(100)
//!     .with_random_state(42)
//!     .generate()
//!     .unwrap();
//! assert_eq!(data.len(), 100);
//! ```

use crate::error::{CentinelaError, Result};
use crate::telemetry::{SensorDataset, SensorSample, CHANNEL_COUNT};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Static shape of one simulated channel.
struct ChannelProfile {
    /// Range the per-run baseline is drawn from
    baseline: (f32, f32),
    /// Range the per-run noise standard deviation is drawn from
    noise_sigma: (f32, f32),
    /// Cycles of the sinusoidal component over the whole dataset
    cycle_freq: f32,
    /// Amplitude of the sinusoidal component
    cycle_amplitude: f32,
    /// Half-width of the uniform jitter term
    jitter: f32,
    /// Mean perturbation magnitude for injected anomalies
    anomaly_mean: f32,
    /// Standard deviation of the perturbation magnitude
    anomaly_sigma: f32,
    /// Base orientation of the perturbation before the random sign flip
    anomaly_orientation: f32,
}

/// Temperature, vibration, pressure.
const PROFILES: [ChannelProfile; CHANNEL_COUNT] = [
    ChannelProfile {
        baseline: (65.0, 85.0),
        noise_sigma: (2.0, 4.0),
        cycle_freq: 3.0,
        cycle_amplitude: 1.5,
        jitter: 0.5,
        anomaly_mean: 10.0,
        anomaly_sigma: 2.0,
        anomaly_orientation: 1.0,
    },
    ChannelProfile {
        baseline: (0.2, 0.5),
        noise_sigma: (0.03, 0.07),
        cycle_freq: 8.0,
        cycle_amplitude: 0.03,
        jitter: 0.01,
        anomaly_mean: 0.2,
        anomaly_sigma: 0.05,
        anomaly_orientation: 1.0,
    },
    ChannelProfile {
        baseline: (90.0, 110.0),
        noise_sigma: (3.0, 7.0),
        cycle_freq: 5.0,
        cycle_amplitude: 2.5,
        jitter: 0.8,
        anomaly_mean: 15.0,
        anomaly_sigma: 3.0,
        anomaly_orientation: -1.0,
    },
];

/// Builder for synthetic sensor datasets.
#[derive(Debug, Clone)]
pub struct TelemetrySimulator {
    n_samples: usize,
    anomaly_ratio: f32,
    random_state: Option<u64>,
}

impl TelemetrySimulator {
    /// Creates a simulator with defaults: 1000 samples, 5% anomalies,
    /// entropy-seeded randomness.
    #[must_use]
    pub fn new() -> Self {
        Self {
            n_samples: 1000,
            anomaly_ratio: 0.05,
            random_state: None,
        }
    }

    /// Sets the number of samples to generate.
    #[must_use]
    pub fn with_n_samples(mut self, n_samples: usize) -> Self {
        self.n_samples = n_samples;
        self
    }

    /// Sets the fraction of samples that receive an anomalous perturbation.
    #[must_use]
    pub fn with_anomaly_ratio(mut self, anomaly_ratio: f32) -> Self {
        self.anomaly_ratio = anomaly_ratio;
        self
    }

    /// Sets the random state for reproducibility.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    /// Generates a dataset.
    ///
    /// Exactly `round(anomaly_ratio * n_samples)` samples are perturbed
    /// on all three channels; which ones is not recorded.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` if fewer than 2 samples are
    /// requested (too few to train on).
    pub fn generate(&self) -> Result<SensorDataset> {
        if self.n_samples < 2 {
            return Err(CentinelaError::invalid_hyperparameter(
                "n_samples",
                self.n_samples,
                ">= 2",
            ));
        }

        let mut rng = match self.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        // Per-run baselines and noise levels, so successive runs differ.
        let mut baselines = [0.0_f32; CHANNEL_COUNT];
        let mut sigmas = [0.0_f32; CHANNEL_COUNT];
        for (c, profile) in PROFILES.iter().enumerate() {
            baselines[c] = rng.gen_range(profile.baseline.0..profile.baseline.1);
            sigmas[c] = rng.gen_range(profile.noise_sigma.0..profile.noise_sigma.1);
        }

        let n = self.n_samples;
        let mut samples = Vec::with_capacity(n);
        for i in 0..n {
            let phase = i as f32 / n as f32;
            let mut sample = SensorSample::new(0.0, 0.0, 0.0);
            for (c, profile) in PROFILES.iter().enumerate() {
                let noise = sigmas[c] * standard_normal(&mut rng);
                let cycle = profile.cycle_amplitude
                    * (2.0 * std::f32::consts::PI * profile.cycle_freq * phase).sin();
                let jitter = rng.gen_range(-profile.jitter..profile.jitter);
                sample.set_channel(c, baselines[c] + noise + cycle + jitter);
            }
            samples.push(sample);
        }

        self.inject_anomalies(&mut samples, &mut rng);

        // Destroy temporal order so the detector cannot exploit position.
        samples.shuffle(&mut rng);

        Ok(SensorDataset::from_samples(samples))
    }

    /// Perturbs `round(ratio * n)` samples at indices drawn without
    /// replacement. Ground-truth labels are discarded here.
    fn inject_anomalies(&self, samples: &mut [SensorSample], rng: &mut StdRng) {
        let n = samples.len();
        let k = (self.anomaly_ratio * n as f32).round() as usize;
        if k == 0 {
            return;
        }

        // Partial Fisher-Yates: the first k entries are a uniform
        // without-replacement draw.
        let mut indices: Vec<usize> = (0..n).collect();
        for i in 0..k.min(n) {
            let j = rng.gen_range(i..n);
            indices.swap(i, j);
        }

        for &idx in &indices[..k.min(n)] {
            for (c, profile) in PROFILES.iter().enumerate() {
                let magnitude = profile.anomaly_mean + profile.anomaly_sigma * standard_normal(rng);
                let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                let current = samples[idx].channel(c);
                samples[idx].set_channel(c, current + sign * profile.anomaly_orientation * magnitude);
            }
        }
    }
}

impl Default for TelemetrySimulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Draws one standard normal variate via the Box-Muller transform.
fn standard_normal(rng: &mut StdRng) -> f32 {
    let u1: f32 = rng.gen_range(0.0001_f32..1.0_f32);
    let u2: f32 = rng.gen_range(0.0_f32..1.0_f32);
    (-2.0_f32 * u1.ln()).sqrt() * (2.0_f32 * std::f32::consts::PI * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_requested_size() {
        let data = TelemetrySimulator::new()
            .with_n_samples(128)
            .with_random_state(7)
            .generate()
            .expect("generate should succeed");
        assert_eq!(data.len(), 128);
    }

    #[test]
    fn test_rejects_too_few_samples() {
        for n in [0, 1] {
            let err = TelemetrySimulator::new()
                .with_n_samples(n)
                .generate()
                .expect_err("n < 2 must be rejected");
            assert!(matches!(
                err,
                CentinelaError::InvalidHyperparameter { .. }
            ));
        }
    }

    #[test]
    fn test_same_seed_same_dataset() {
        let a = TelemetrySimulator::new()
            .with_n_samples(200)
            .with_random_state(42)
            .generate()
            .expect("generate should succeed");
        let b = TelemetrySimulator::new()
            .with_n_samples(200)
            .with_random_state(42)
            .generate()
            .expect("generate should succeed");
        assert_eq!(a, b, "same seed should give identical datasets");
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = TelemetrySimulator::new()
            .with_n_samples(200)
            .with_random_state(1)
            .generate()
            .expect("generate should succeed");
        let b = TelemetrySimulator::new()
            .with_n_samples(200)
            .with_random_state(2)
            .generate()
            .expect("generate should succeed");
        assert_ne!(a, b);
    }

    #[test]
    fn test_clean_dataset_stays_in_envelope() {
        // With no injected anomalies every value should sit within a
        // loose envelope around the baseline ranges.
        let data = TelemetrySimulator::new()
            .with_n_samples(500)
            .with_anomaly_ratio(0.0)
            .with_random_state(11)
            .generate()
            .expect("generate should succeed");
        for s in &data {
            assert!(s.temperature > 30.0 && s.temperature < 120.0);
            assert!(s.vibration > -0.5 && s.vibration < 1.2);
            assert!(s.pressure > 40.0 && s.pressure < 160.0);
        }
    }

    #[test]
    fn test_minimal_dataset_of_two() {
        let data = TelemetrySimulator::new()
            .with_n_samples(2)
            .with_random_state(3)
            .generate()
            .expect("n = 2 is the minimum and must succeed");
        assert_eq!(data.len(), 2);
    }
}
