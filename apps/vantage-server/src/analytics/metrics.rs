//! Return metrics over a normalized equity series.

use serde::Serialize;

use super::math::{mean, std_dev};

/// Seconds in a day.
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Average days in a year, accounting for leap years.
const DAYS_PER_YEAR: f64 = 365.25;

/// Trading days per year, used to annualize the Sharpe ratio.
///
/// The factor assumes daily-equivalent steps regardless of the series'
/// actual sampling cadence. The upstream dashboard this replaces made the
/// same simplification; it is reproduced rather than corrected.
const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Spans shorter than this produce statistically noisy annualized figures.
const NOISY_SPAN_DAYS: f64 = 30.0;

/// Summary statistics for a portfolio equity curve.
///
/// All fields are guaranteed finite; a degenerate computation collapses the
/// affected field to zero independently of the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Final equity over initial equity, minus one (0.15 = 15%).
    pub total_return: f64,
    /// CAGR over the observed span.
    pub annualized_return: f64,
    /// Mean step return over its sample standard deviation, annualized.
    pub sharpe_ratio: f64,
}

/// Compute total return, annualized return, and Sharpe ratio.
///
/// The input is a normalized series from [`super::normalize`]: positive
/// finite equity values paired with epoch-second timestamps, ascending.
/// Fewer than 2 points (or fewer than 2 usable per-step returns) yields
/// all-zero metrics: the dashboard always renders a number, so there is no
/// error path here.
#[must_use]
pub fn compute_metrics(series: &[(f64, i64)]) -> Metrics {
    if series.len() < 2 {
        return Metrics::default();
    }

    let returns = step_returns(series);
    if returns.len() < 2 {
        return Metrics::default();
    }

    let (first_equity, first_ts) = series[0];
    let (last_equity, last_ts) = series[series.len() - 1];

    let total_return = last_equity / first_equity - 1.0;

    let days = (last_ts - first_ts) as f64 / SECONDS_PER_DAY;
    let years = days / DAYS_PER_YEAR;
    let annualized_return = if days > 0.0 && years > 0.0 {
        (last_equity / first_equity).powf(1.0 / years) - 1.0
    } else {
        0.0
    };

    if days < NOISY_SPAN_DAYS {
        tracing::debug!(
            span_days = days,
            "short observation span, annualized figures are noisy"
        );
    }

    let sharpe_ratio = match (mean(&returns), std_dev(&returns)) {
        (Some(avg), Some(std)) if std > 0.0 => avg / std * TRADING_DAYS_PER_YEAR.sqrt(),
        _ => 0.0,
    };

    Metrics {
        total_return: finite_or_zero(total_return),
        annualized_return: finite_or_zero(annualized_return),
        sharpe_ratio: finite_or_zero(sharpe_ratio),
    }
}

/// Per-step simple returns, with non-finite results discarded.
///
/// Division by zero cannot happen on a normalized series (equities are
/// strictly positive), but the filter stays as a guard against callers
/// passing unfiltered data.
fn step_returns(series: &[(f64, i64)]) -> Vec<f64> {
    series
        .windows(2)
        .map(|pair| (pair[1].0 - pair[0].0) / pair[0].0)
        .filter(|r| r.is_finite())
        .collect()
}

/// Collapse NaN/Infinity to zero.
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
