//! Flat-file data sources.
//!
//! Benchmark index series and the optional curated trade log live as JSON
//! files on disk, produced by external fetch scripts. Files that are
//! absent, unreadable, or malformed degrade to empty data; the dashboard
//! renders without the affected section rather than failing.

use std::path::PathBuf;

use serde::Deserialize;

use crate::models::{BenchmarkPoint, TradeRecord};

/// Benchmark data file name, as written by the fetch script.
const BENCHMARK_FILE: &str = "benchmark_data.json";

/// Curated trade log file name.
const TRADES_FILE: &str = "trades.json";

/// A named benchmark series ready for charting.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkSeries {
    /// Display name of the index.
    pub name: String,
    /// Observations, chronologically ascending as fetched.
    pub points: Vec<BenchmarkPoint>,
}

/// On-disk shape of the benchmark data file.
#[derive(Debug, Default, Deserialize)]
struct BenchmarkFile {
    #[serde(default, rename = "sp500Data")]
    sp500_data: Vec<BenchmarkPoint>,
    #[serde(default, rename = "nasdaqData")]
    nasdaq_data: Vec<BenchmarkPoint>,
}

/// Reader for the flat-file data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Create a store over the given data directory.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the benchmark index series.
    ///
    /// Points with a non-finite or non-positive value are dropped here, so
    /// downstream charting only ever sees usable observations.
    pub async fn load_benchmarks(&self) -> Vec<BenchmarkSeries> {
        let file: BenchmarkFile = self.read_json(BENCHMARK_FILE).await.unwrap_or_default();

        [
            ("S&P 500", file.sp500_data),
            ("NASDAQ Composite", file.nasdaq_data),
        ]
        .into_iter()
        .map(|(name, points)| BenchmarkSeries {
            name: name.to_string(),
            points: points
                .into_iter()
                .filter(|p| p.value.is_finite() && p.value > 0.0)
                .collect(),
        })
        .filter(|series| !series.points.is_empty())
        .collect()
    }

    /// Load the curated trade log, empty when the file is absent.
    pub async fn load_curated_trades(&self) -> Vec<TradeRecord> {
        self.read_json(TRADES_FILE).await.unwrap_or_default()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(&self, file_name: &str) -> Option<T> {
        let path = self.data_dir.join(file_name);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "data file not readable");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "data file malformed, ignoring");
                None
            }
        }
    }
}
