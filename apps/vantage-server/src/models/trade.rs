//! Trade activity records.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    /// Long-equivalent exposure (buys map here).
    #[serde(alias = "buy")]
    Long,
    /// Short-equivalent exposure (sells map here).
    #[serde(alias = "sell")]
    Short,
}

/// A record of executed trade activity.
///
/// Two shapes reach the aggregator: raw brokerage fills (no booked P/L) and
/// curated closed trades with entry/exit prices and a realized P/L. The
/// aggregator distinguishes them through [`TradeRecord::realized_pl`], not
/// by sniffing field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TradeRecord {
    /// A curated closed trade from the trade log.
    #[serde(rename_all = "camelCase")]
    Closed {
        /// Instrument ticker.
        ticker: String,
        /// Trade direction.
        #[serde(rename = "type")]
        side: TradeSide,
        /// Entry price.
        enter_price: Decimal,
        /// Exit price.
        exit_price: Decimal,
        /// Traded quantity.
        quantity: Decimal,
        /// Profit or loss booked when the trade closed.
        #[serde(rename = "realizedPL")]
        realized_pl: Decimal,
        /// Close date.
        date: NaiveDate,
    },
    /// A raw brokerage fill.
    #[serde(rename_all = "camelCase")]
    Fill {
        /// Instrument symbol.
        symbol: String,
        /// Fill direction.
        side: TradeSide,
        /// Filled quantity.
        quantity: Decimal,
        /// Average fill price.
        price: Decimal,
        /// Fill time.
        filled_at: DateTime<Utc>,
    },
}

impl TradeRecord {
    /// Booked P/L for closed trades; `None` for raw fills.
    ///
    /// Fills contribute zero to aggregate P/L and are counted as neither
    /// wins nor losses, but they still count toward the record total.
    #[must_use]
    pub const fn realized_pl(&self) -> Option<Decimal> {
        match self {
            Self::Closed { realized_pl, .. } => Some(*realized_pl),
            Self::Fill { .. } => None,
        }
    }

    /// The record's execution time, used for window filtering and sorting.
    ///
    /// Closed trades carry a calendar date only; it maps to UTC midnight.
    #[must_use]
    pub fn executed_at(&self) -> DateTime<Utc> {
        match self {
            Self::Closed { date, .. } => date.and_time(NaiveTime::MIN).and_utc(),
            Self::Fill { filled_at, .. } => *filled_at,
        }
    }
}
