//! Trade activity aggregation.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::TradeRecord;

/// Summary statistics over the aggregated trade window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeSummary {
    /// Number of records in the window, fills included.
    pub total: usize,
    /// Records with a strictly positive realized P/L.
    pub win_count: usize,
    /// `win_count / total * 100` at one decimal place ("0.0" when empty).
    pub win_rate: Decimal,
    /// Sum of realized P/L, fills contributing zero.
    #[serde(rename = "totalPL")]
    pub total_pl: Decimal,
}

impl Default for TradeSummary {
    fn default() -> Self {
        Self {
            total: 0,
            win_count: 0,
            win_rate: zero_rate(),
            total_pl: Decimal::ZERO,
        }
    }
}

/// Filter trade records to a recency window and derive summary statistics.
///
/// Records older than `window_days` before `now` are dropped; survivors are
/// sorted by execution time descending (most recent first, original order
/// preserved on ties). Raw fills count toward the total but are neither
/// wins nor losses, and contribute zero P/L.
#[must_use]
pub fn aggregate(
    records: Vec<TradeRecord>,
    window_days: i64,
    now: DateTime<Utc>,
) -> (Vec<TradeRecord>, TradeSummary) {
    let cutoff = now - Duration::days(window_days);

    let mut windowed: Vec<TradeRecord> = records
        .into_iter()
        .filter(|record| record.executed_at() >= cutoff)
        .collect();
    // Stable sort keeps original relative order for same-date records.
    windowed.sort_by(|a, b| b.executed_at().cmp(&a.executed_at()));

    let total = windowed.len();
    let win_count = windowed
        .iter()
        .filter(|record| record.realized_pl().is_some_and(|pl| pl > Decimal::ZERO))
        .count();
    let total_pl: Decimal = windowed
        .iter()
        .map(|record| record.realized_pl().unwrap_or(Decimal::ZERO))
        .sum();

    let win_rate = if total == 0 {
        // Division-by-zero guard, not an error.
        zero_rate()
    } else {
        let mut rate =
            (Decimal::from(win_count as u64) * Decimal::ONE_HUNDRED / Decimal::from(total as u64))
                .round_dp(1);
        rate.rescale(1);
        rate
    };

    (
        windowed,
        TradeSummary {
            total,
            win_count,
            win_rate,
            total_pl,
        },
    )
}

/// Zero at scale 1, so it serializes as `"0.0"`.
fn zero_rate() -> Decimal {
    Decimal::new(0, 1)
}
