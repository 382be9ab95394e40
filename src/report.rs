//! Run summary record.
//!
//! The [`DetectionResult`] is the engine's sole observable output: a
//! failure probability, the sample counts behind it, and a UTC
//! timestamp. It is built once per run, never mutated, and serialized
//! by the caller (the bundled CLI prints it as one JSON object).

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Immutable summary of one detection run.
///
/// # Examples
///
/// ```
/// use centinela::report::DetectionResult;
///
/// let labels = [true, false, false, true, false];
/// let result = DetectionResult::from_labels(&labels);
/// assert_eq!(result.total_samples, 5);
/// assert_eq!(result.anomaly_count, 2);
/// assert_eq!(result.failure_probability, 0.4);
/// assert!(result.timestamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Fraction of samples labeled anomalous
    pub failure_probability: f64,
    /// Number of samples scored
    pub total_samples: usize,
    /// Number of samples labeled anomalous
    pub anomaly_count: usize,
    /// ISO-8601 UTC timestamp of the run, Z-suffixed
    pub timestamp: String,
}

impl DetectionResult {
    /// Reduces per-sample anomaly labels into a summary record,
    /// stamped with the current UTC time.
    #[must_use]
    pub fn from_labels(labels: &[bool]) -> Self {
        let total_samples = labels.len();
        let anomaly_count = labels.iter().filter(|&&a| a).count();
        let failure_probability = if total_samples == 0 {
            0.0
        } else {
            anomaly_count as f64 / total_samples as f64
        };
        Self {
            failure_probability,
            total_samples,
            anomaly_count,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_is_count_ratio() {
        let mut labels = vec![false; 1000];
        for l in labels.iter_mut().take(50) {
            *l = true;
        }
        let result = DetectionResult::from_labels(&labels);
        assert_eq!(result.total_samples, 1000);
        assert_eq!(result.anomaly_count, 50);
        assert_eq!(result.failure_probability, 0.05);
    }

    #[test]
    fn test_empty_labels() {
        let result = DetectionResult::from_labels(&[]);
        assert_eq!(result.total_samples, 0);
        assert_eq!(result.anomaly_count, 0);
        assert_eq!(result.failure_probability, 0.0);
    }

    #[test]
    fn test_timestamp_shape() {
        let result = DetectionResult::from_labels(&[false, true]);
        let ts = result.timestamp.as_bytes();
        // YYYY-MM-DDTHH:MM:SSZ
        assert_eq!(ts.len(), 20, "unexpected timestamp {:?}", result.timestamp);
        assert_eq!(ts[4], b'-');
        assert_eq!(ts[7], b'-');
        assert_eq!(ts[10], b'T');
        assert_eq!(ts[13], b':');
        assert_eq!(ts[16], b':');
        assert_eq!(ts[19], b'Z');
    }

    #[test]
    fn test_serializes_expected_fields() {
        let result = DetectionResult::from_labels(&[true, false, false, false]);
        let json = serde_json::to_value(&result).expect("serialization should succeed");
        assert_eq!(json["total_samples"], 4);
        assert_eq!(json["anomaly_count"], 1);
        assert_eq!(json["failure_probability"], 0.25);
        assert!(json["timestamp"].is_string());
    }
}
