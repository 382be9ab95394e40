//! Single isolation tree: random binary partitioning of a subsample.

use crate::telemetry::{SensorSample, CHANNEL_COUNT};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Euler-Mascheroni constant, used in the path-length correction.
pub(crate) const EULER_GAMMA: f32 = 0.577_215_66;

/// Expected average path length of an unsuccessful BST search over
/// `n` items: the correction term c(n) from the isolation forest
/// scoring formula. Defined as 0 for n <= 1.
#[must_use]
pub(crate) fn average_path_length(n: usize) -> f32 {
    if n <= 1 {
        return 0.0;
    }
    let n = n as f32;
    2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
}

/// A node in an isolation tree (either a random split or a leaf).
///
/// Children are owned boxes; the tree is acyclic by construction and
/// carries no back-references.
#[derive(Debug, Clone, Serialize, Deserialize)]
enum IsoNode {
    /// Internal node: samples with `channel < threshold` go left,
    /// the rest go right.
    Split {
        /// Index of the channel the split was drawn on
        channel: usize,
        /// Split threshold, uniform in (min, max) of the channel
        threshold: f32,
        /// Subtree for values below the threshold
        left: Box<IsoNode>,
        /// Subtree for values at or above the threshold
        right: Box<IsoNode>,
    },
    /// Terminal node.
    Leaf {
        /// Number of training samples routed here
        n_samples: usize,
        /// Depth of this leaf from the root
        depth: usize,
    },
}

/// One random binary partition tree over a subsample.
///
/// Anomalies, being few and differently distributed, are isolated by
/// few random splits (short root-to-leaf path); dense normal regions
/// need many. Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsolationTree {
    root: IsoNode,
    height_limit: usize,
}

impl IsolationTree {
    /// Builds a tree over `samples` with height limit `ceil(log2(len))`.
    pub(crate) fn fit(samples: &[SensorSample], rng: &mut StdRng) -> Self {
        let height_limit = height_limit_for(samples.len());
        let root = build_node(samples.to_vec(), 0, height_limit, rng);
        Self { root, height_limit }
    }

    /// Returns the height limit this tree was built with.
    #[must_use]
    pub fn height_limit(&self) -> usize {
        self.height_limit
    }

    /// Path length h(x): the depth of the leaf `sample` is routed to,
    /// plus the expected-extra-depth correction for the leaf's size.
    #[must_use]
    pub fn path_length(&self, sample: &SensorSample) -> f32 {
        let mut node = &self.root;
        loop {
            match node {
                IsoNode::Leaf { n_samples, depth } => {
                    return *depth as f32 + average_path_length(*n_samples);
                }
                IsoNode::Split {
                    channel,
                    threshold,
                    left,
                    right,
                } => {
                    node = if sample.channel(*channel) < *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

/// Height limit for a subsample of `n` samples.
fn height_limit_for(n: usize) -> usize {
    if n <= 1 {
        0
    } else {
        (n as f32).log2().ceil() as usize
    }
}

fn build_node(samples: Vec<SensorSample>, depth: usize, limit: usize, rng: &mut StdRng) -> IsoNode {
    if samples.len() <= 1 || depth >= limit {
        return IsoNode::Leaf {
            n_samples: samples.len(),
            depth,
        };
    }

    let channel = rng.gen_range(0..CHANNEL_COUNT);
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for s in &samples {
        let v = s.channel(channel);
        min = min.min(v);
        max = max.max(v);
    }

    // Zero variance on the chosen channel: no separating split exists.
    if min == max {
        return IsoNode::Leaf {
            n_samples: samples.len(),
            depth,
        };
    }

    let threshold = rng.gen_range(min..max);
    let (below, above): (Vec<_>, Vec<_>) = samples
        .into_iter()
        .partition(|s| s.channel(channel) < threshold);

    IsoNode::Split {
        channel,
        threshold,
        left: Box::new(build_node(below, depth + 1, limit, rng)),
        right: Box::new(build_node(above, depth + 1, limit, rng)),
    }
}
