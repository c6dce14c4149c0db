//! Portfolio performance analytics.
//!
//! Implements the numeric core of the dashboard:
//! - Time-series normalization (pairing and filtering raw equity history)
//! - Return metrics (total return, annualized return, Sharpe ratio)
//! - Rebasing to a percent-change-from-first axis for comparison charts
//! - Trade/fill aggregation (recency window, win rate, realized P/L)
//!
//! Every function here is pure and total: malformed or insufficient input
//! degrades to zeroed metrics or empty series, never to an error. The
//! rendering layer must always have a number to show.

mod math;
mod metrics;
mod rebase;
mod series;
mod trades;

pub use metrics::{Metrics, compute_metrics};
pub use rebase::rebase;
pub use series::normalize;
pub use trades::{TradeSummary, aggregate};
