//! Rank-based anomaly classification.
//!
//! Scores are ranked descending and the top `round(contamination * N)`
//! samples are labeled anomalous. The empirical anomaly rate therefore
//! matches the contamination ratio exactly, whatever the score
//! distribution looks like on a given run. This is a deliberate
//! deterministic policy rather than a fixed score cutoff.

use crate::error::{CentinelaError, Result};

/// Labels the top `round(contamination * scores.len())` scores as
/// anomalous (true) and the rest as normal (false).
///
/// Ties at the cut rank are broken by position, keeping the labeled
/// count exact.
///
/// # Errors
///
/// Returns `InvalidHyperparameter` if `contamination` is outside (0, 1).
///
/// # Examples
///
/// ```
/// use centinela::detect::label_top_fraction;
///
/// let scores = [0.2, 0.9, 0.4, 0.3, 0.8, 0.1, 0.5, 0.45, 0.35, 0.25];
/// let labels = label_top_fraction(&scores, 0.2).unwrap();
/// assert_eq!(labels.iter().filter(|&&a| a).count(), 2);
/// assert!(labels[1] && labels[4]);
/// ```
pub fn label_top_fraction(scores: &[f32], contamination: f32) -> Result<Vec<bool>> {
    if !(contamination > 0.0 && contamination < 1.0) {
        return Err(CentinelaError::invalid_hyperparameter(
            "contamination",
            contamination,
            "in (0, 1)",
        ));
    }

    let n = scores.len();
    let k = (contamination * n as f32).round() as usize;

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_unstable_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut labels = vec![false; n];
    for &idx in &order[..k.min(n)] {
        labels[idx] = true;
    }
    Ok(labels)
}
