//! Benchmark index observations.

use serde::{Deserialize, Serialize};

/// One closing observation of a benchmark index.
///
/// The first point of a series is its rebasing anchor; a series whose
/// anchor is not strictly positive is treated as empty for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkPoint {
    /// Calendar date, `%Y-%m-%d`.
    pub date: String,
    /// Closing value of the index.
    pub value: f64,
}
