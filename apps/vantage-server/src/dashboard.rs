//! Dashboard assembly.
//!
//! One computation pass per request: fetch the upstream resources
//! concurrently, normalize, compute metrics and chart series, aggregate
//! trades, and emit a single response object. The response shape is always
//! well-formed; failures either degrade a single section to its empty
//! default or, for auth/quota failures, zero the whole document and set the
//! `error` field.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analytics::{self, Metrics, TradeSummary};
use crate::broker::{AlpacaClient, AlpacaError, AlpacaOrder, AlpacaPosition, PortfolioHistory};
use crate::data::{BenchmarkSeries, FileStore};
use crate::models::{BenchmarkPoint, Position, TradeRecord};

/// Maximum chart points in benchmark-only fallback mode.
const FALLBACK_WINDOW: usize = 52;

/// One rebased line of the comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkLine {
    /// Display name of the index.
    pub name: String,
    /// Percent change from the series' own first observation.
    pub values: Vec<f64>,
}

/// Chart payload: label axis plus rebased percentage curves.
///
/// All curves share a zero-based percentage scale anchored at their own
/// first observation. Alignment between portfolio and benchmarks is by
/// position index, not by calendar date.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    /// Date labels for the x axis.
    pub labels: Vec<String>,
    /// Rebased portfolio equity curve (empty when no history).
    pub portfolio: Vec<f64>,
    /// Rebased benchmark curves; a series that cannot be rebased is omitted.
    pub benchmarks: Vec<BenchmarkLine>,
}

/// The aggregated dashboard document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// When this document was assembled.
    pub last_updated: DateTime<Utc>,
    /// Portfolio performance metrics.
    pub metrics: Metrics,
    /// Open positions, normalized for display.
    pub positions: Vec<Position>,
    /// Comparison chart payload.
    pub chart: ChartData,
    /// Trade records in the lookback window, most recent first.
    pub trades: Vec<TradeRecord>,
    /// Summary statistics over `trades`.
    pub summary: TradeSummary,
    /// Set when the whole upstream fetch failed; every other field is then
    /// zeroed/empty but present.
    pub error: Option<String>,
}

impl DashboardResponse {
    /// A well-formed all-defaults document carrying an error message.
    #[must_use]
    pub fn failed(message: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            last_updated: now,
            metrics: Metrics::default(),
            positions: Vec::new(),
            chart: ChartData::default(),
            trades: Vec::new(),
            summary: TradeSummary::default(),
            error: Some(message.into()),
        }
    }
}

/// Everything fetched upstream for one assembly pass.
#[derive(Debug, Default)]
pub struct UpstreamData {
    /// Raw open positions.
    pub positions: Vec<AlpacaPosition>,
    /// Raw equity history.
    pub history: PortfolioHistory,
    /// Raw order records.
    pub orders: Vec<AlpacaOrder>,
    /// Benchmark index series from the data directory.
    pub benchmarks: Vec<BenchmarkSeries>,
    /// Curated trade log from the data directory.
    pub curated_trades: Vec<TradeRecord>,
}

/// Assembles dashboard documents from the brokerage API and data files.
#[derive(Debug, Clone)]
pub struct DashboardService {
    broker: AlpacaClient,
    store: FileStore,
    trade_window_days: i64,
}

impl DashboardService {
    /// Create a service over the given collaborators.
    #[must_use]
    pub const fn new(broker: AlpacaClient, store: FileStore, trade_window_days: i64) -> Self {
        Self {
            broker,
            store,
            trade_window_days,
        }
    }

    /// Fetch everything and assemble one dashboard document.
    ///
    /// The three brokerage fetches and the two file reads are independent
    /// and issued concurrently. A failed fetch degrades to its empty
    /// default, except auth/quota failures which fail the whole document.
    pub async fn assemble(&self) -> DashboardResponse {
        let now = Utc::now();

        let (positions, history, orders, benchmarks, curated_trades) = tokio::join!(
            self.broker.positions(),
            self.broker.portfolio_history(),
            self.broker.orders(),
            self.store.load_benchmarks(),
            self.store.load_curated_trades(),
        );

        if let Some(fatal) = fatal_error(&positions)
            .or_else(|| fatal_error(&history))
            .or_else(|| fatal_error(&orders))
        {
            tracing::error!(error = %fatal, "upstream unavailable, failing dashboard request");
            return DashboardResponse::failed(fatal.to_string(), now);
        }

        let data = UpstreamData {
            positions: positions.unwrap_or_else(|e| degraded("positions", &e)),
            history: history.unwrap_or_else(|e| degraded("portfolio history", &e)),
            orders: orders.unwrap_or_else(|e| degraded("orders", &e)),
            benchmarks,
            curated_trades,
        };

        build_dashboard(data, self.trade_window_days, now)
    }
}

/// The fatal error of a fetch result, if any.
fn fatal_error<T>(result: &Result<T, AlpacaError>) -> Option<&AlpacaError> {
    result.as_ref().err().filter(|e| e.is_fatal())
}

/// Log a non-fatal fetch failure and substitute the empty default.
fn degraded<T: Default>(resource: &str, error: &AlpacaError) -> T {
    tracing::warn!(resource, error = %error, "fetch failed, continuing with empty default");
    T::default()
}

/// Pure assembly over already-fetched data.
///
/// Deterministic for a given input: running it twice over identical data
/// and the same `now` yields an identical document.
pub fn build_dashboard(
    data: UpstreamData,
    trade_window_days: i64,
    now: DateTime<Utc>,
) -> DashboardResponse {
    let series = analytics::normalize(&data.history.equity, &data.history.timestamp);
    let metrics = analytics::compute_metrics(&series);

    let chart = build_chart(&series, &data.benchmarks);

    let positions: Vec<Position> = data.positions.iter().map(Position::from_api).collect();

    // The curated trade log, when present, supersedes raw brokerage fills;
    // both shapes flow through the same aggregator.
    let records = if data.curated_trades.is_empty() {
        data.orders.iter().filter_map(AlpacaOrder::to_fill).collect()
    } else {
        data.curated_trades
    };
    let (trades, summary) = analytics::aggregate(records, trade_window_days, now);

    DashboardResponse {
        last_updated: now,
        metrics,
        positions,
        chart,
        trades,
        summary,
        error: None,
    }
}

/// Build the comparison chart.
///
/// With portfolio history: labels come from the portfolio timestamps, the
/// portfolio curve is rebased, and each benchmark is rebased against its
/// own first observation then truncated to the label count by position.
/// Without history: the most recent [`FALLBACK_WINDOW`] benchmark points
/// are kept and their dates become the labels.
fn build_chart(series: &[(f64, i64)], benchmarks: &[BenchmarkSeries]) -> ChartData {
    if series.is_empty() {
        return fallback_chart(benchmarks);
    }

    let labels: Vec<String> = series.iter().map(|(_, ts)| date_label(*ts)).collect();
    let equities: Vec<f64> = series.iter().map(|(eq, _)| *eq).collect();
    let portfolio = analytics::rebase(&equities);

    let benchmarks = benchmarks
        .iter()
        .filter_map(|s| {
            let values: Vec<f64> = s.points.iter().map(|p| p.value).collect();
            let mut rebased = analytics::rebase(&values);
            if rebased.is_empty() {
                // Cannot be rebased; omit the line rather than erroring.
                return None;
            }
            rebased.truncate(labels.len());
            Some(BenchmarkLine {
                name: s.name.clone(),
                values: rebased,
            })
        })
        .collect();

    ChartData {
        labels,
        portfolio,
        benchmarks,
    }
}

/// Benchmark-only chart for accounts with no portfolio history yet.
fn fallback_chart(benchmarks: &[BenchmarkSeries]) -> ChartData {
    let lines: Vec<(Vec<String>, BenchmarkLine)> = benchmarks
        .iter()
        .filter_map(|s| {
            let recent: Vec<&BenchmarkPoint> = s
                .points
                .iter()
                .skip(s.points.len().saturating_sub(FALLBACK_WINDOW))
                .collect();
            let values: Vec<f64> = recent.iter().map(|p| p.value).collect();
            let rebased = analytics::rebase(&values);
            if rebased.is_empty() {
                return None;
            }
            let dates = recent.iter().map(|p| p.date.clone()).collect();
            Some((
                dates,
                BenchmarkLine {
                    name: s.name.clone(),
                    values: rebased,
                },
            ))
        })
        .collect();

    let labels = lines
        .first()
        .map(|(dates, _)| dates.clone())
        .unwrap_or_default();

    ChartData {
        labels,
        portfolio: Vec::new(),
        benchmarks: lines.into_iter().map(|(_, line)| line).collect(),
    }
}

/// Format an epoch-second timestamp as a calendar date label.
fn date_label(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map_or_else(String::new, |d| d.format("%Y-%m-%d").to_string())
}
