//! Sensor telemetry types.
//!
//! A [`SensorSample`] is one reading across three correlated channels
//! (temperature, vibration, pressure); a [`SensorDataset`] is an owned,
//! fixed-size collection of samples. Samples carry no identity beyond
//! their position, and dataset order is not meaningful after the
//! simulator's final shuffle.

use serde::{Deserialize, Serialize};

/// Number of channels in a sensor sample.
pub const CHANNEL_COUNT: usize = 3;

/// One multivariate sensor reading.
///
/// # Examples
///
/// ```
/// use centinela::telemetry::SensorSample;
///
/// let s = SensorSample::new(75.0, 0.3, 100.0);
/// assert_eq!(s.channel(0), 75.0);
/// assert_eq!(s.channel(2), 100.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// Temperature reading
    pub temperature: f32,
    /// Vibration reading
    pub vibration: f32,
    /// Pressure reading
    pub pressure: f32,
}

impl SensorSample {
    /// Creates a sample from its three channel values.
    #[must_use]
    pub fn new(temperature: f32, vibration: f32, pressure: f32) -> Self {
        Self {
            temperature,
            vibration,
            pressure,
        }
    }

    /// Returns the value of a channel by positional index.
    ///
    /// Channel 0 is temperature, 1 is vibration, 2 is pressure.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= CHANNEL_COUNT`.
    #[must_use]
    pub fn channel(&self, idx: usize) -> f32 {
        match idx {
            0 => self.temperature,
            1 => self.vibration,
            2 => self.pressure,
            _ => panic!("channel index out of bounds: {idx}"),
        }
    }

    /// Sets the value of a channel by positional index.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= CHANNEL_COUNT`.
    pub fn set_channel(&mut self, idx: usize, value: f32) {
        match idx {
            0 => self.temperature = value,
            1 => self.vibration = value,
            2 => self.pressure = value,
            _ => panic!("channel index out of bounds: {idx}"),
        }
    }
}

/// An owned collection of sensor samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorDataset {
    samples: Vec<SensorSample>,
}

impl SensorDataset {
    /// Creates a dataset from a vector of samples.
    #[must_use]
    pub fn from_samples(samples: Vec<SensorSample>) -> Self {
        Self { samples }
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the dataset holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the sample at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds.
    #[must_use]
    pub fn get(&self, idx: usize) -> SensorSample {
        self.samples[idx]
    }

    /// Returns the samples as a slice.
    #[must_use]
    pub fn samples(&self) -> &[SensorSample] {
        &self.samples
    }

    /// Returns an iterator over the samples.
    pub fn iter(&self) -> std::slice::Iter<'_, SensorSample> {
        self.samples.iter()
    }
}

impl<'a> IntoIterator for &'a SensorDataset {
    type Item = &'a SensorSample;
    type IntoIter = std::slice::Iter<'a, SensorSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
