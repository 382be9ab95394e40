//! Centinela: unsupervised anomaly detection over synthetic sensor telemetry.
//!
//! Centinela simulates multivariate sensor readings (temperature,
//! vibration, pressure) with a hidden set of injected outliers, scores
//! them with a from-scratch isolation forest, and reduces the scores
//! into a single summary record. It is meant to be invoked as a batch
//! step by an external process that reads the emitted record.
//!
//! # Quick Start
//!
//! ```
//! use centinela::prelude::*;
//!
//! let result = DetectionEngine::new()
//!     .with_n_trees(25)
//!     .with_random_state(42)
//!     .run(200)
//!     .unwrap();
//!
//! assert_eq!(result.total_samples, 200);
//! assert_eq!(result.anomaly_count, 10);
//! assert_eq!(result.failure_probability, 0.05);
//! ```
//!
//! # Modules
//!
//! - [`telemetry`]: Sensor sample and dataset types
//! - [`simulate`]: Synthetic telemetry generation with injected anomalies
//! - [`forest`]: Isolation forest training and path-length scoring
//! - [`detect`]: Rank-based contamination thresholding
//! - [`report`]: The run summary record
//! - [`engine`]: Facade wiring the full pipeline together
//!
//! # Pipeline
//!
//! Data flows strictly forward: simulator -> forest (fit + score) ->
//! classifier -> summary. The forest's trees are independent and built
//! in parallel, each on its own RNG stream derived from the master
//! seed, so seeded runs are reproducible and statistically unbiased.

pub mod detect;
pub mod engine;
pub mod error;
pub mod forest;
pub mod prelude;
pub mod report;
pub mod simulate;
pub mod telemetry;

pub use engine::DetectionEngine;
pub use error::{CentinelaError, Result};
pub use report::DetectionResult;
