//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use centinela::prelude::*;
//! ```

pub use crate::detect::label_top_fraction;
pub use crate::engine::DetectionEngine;
pub use crate::error::{CentinelaError, Result};
pub use crate::forest::IsolationForest;
pub use crate::report::DetectionResult;
pub use crate::simulate::TelemetrySimulator;
pub use crate::telemetry::{SensorDataset, SensorSample, CHANNEL_COUNT};
