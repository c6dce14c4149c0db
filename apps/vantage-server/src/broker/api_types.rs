//! Alpaca API response types.
//!
//! These map to Alpaca's REST wire format. Money fields arrive as strings
//! and may be absent; everything optional is `#[serde(default)]` so a
//! partial record still deserializes. Coercion to zero happens once, in the
//! model layer.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{TradeRecord, TradeSide};

/// Open position from `GET /v2/positions`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlpacaPosition {
    /// Symbol.
    pub symbol: String,
    /// Quantity (string-encoded decimal).
    #[serde(default)]
    pub qty: Option<String>,
    /// Market value.
    #[serde(default)]
    pub market_value: Option<String>,
    /// Unrealized P&L.
    #[serde(default)]
    pub unrealized_pl: Option<String>,
    /// Average entry price.
    #[serde(default)]
    pub avg_entry_price: Option<String>,
    /// Current price.
    #[serde(default)]
    pub current_price: Option<String>,
}

/// Equity history from `GET /v2/account/portfolio/history`.
///
/// Two parallel arrays paired by index; either may contain nulls, and an
/// absent field deserializes as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortfolioHistory {
    /// Equity value per sample.
    #[serde(default)]
    pub equity: Vec<Option<f64>>,
    /// Epoch seconds per sample.
    #[serde(default)]
    pub timestamp: Vec<Option<i64>>,
}

/// Order record from `GET /v2/orders`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlpacaOrder {
    /// Broker order ID.
    #[serde(default)]
    pub id: String,
    /// Symbol.
    #[serde(default)]
    pub symbol: String,
    /// Order side (`buy` / `sell`).
    #[serde(default)]
    pub side: Option<String>,
    /// Order status.
    #[serde(default)]
    pub status: String,
    /// Filled quantity (string-encoded decimal).
    #[serde(default)]
    pub filled_qty: Option<String>,
    /// Average fill price.
    #[serde(default)]
    pub filled_avg_price: Option<String>,
    /// Fill timestamp, RFC 3339.
    #[serde(default)]
    pub filled_at: Option<String>,
}

impl AlpacaOrder {
    /// Convert a filled order into a [`TradeRecord::Fill`].
    ///
    /// Orders that never filled (or whose fill data is incomplete) yield
    /// `None` and are excluded from trade aggregation.
    pub fn to_fill(&self) -> Option<TradeRecord> {
        if self.status != "filled" {
            return None;
        }

        let price: Decimal = self.filled_avg_price.as_deref()?.parse().ok()?;
        let filled_at = self
            .filled_at
            .as_deref()?
            .parse::<chrono::DateTime<chrono::Utc>>()
            .ok()?;
        let quantity: Decimal = self
            .filled_qty
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(Decimal::ZERO);
        let side = match self.side.as_deref() {
            Some("sell") => TradeSide::Short,
            _ => TradeSide::Long,
        };

        Some(TradeRecord::Fill {
            symbol: self.symbol.clone(),
            side,
            quantity,
            price,
            filled_at,
        })
    }
}

/// Error payload from the Alpaca API.
#[derive(Debug, Clone, Deserialize)]
pub struct AlpacaApiError {
    /// Numeric error code.
    #[serde(default)]
    pub code: Option<i64>,
    /// Error message.
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_position_deserializes() {
        let raw: AlpacaPosition = serde_json::from_str(r#"{"symbol": "AAPL"}"#).unwrap();
        assert_eq!(raw.symbol, "AAPL");
        assert!(raw.qty.is_none());
        assert!(raw.market_value.is_none());
    }

    #[test]
    fn history_tolerates_nulls_and_missing_fields() {
        let history: PortfolioHistory =
            serde_json::from_str(r#"{"equity": [100.0, null, 110.0]}"#).unwrap();
        assert_eq!(history.equity.len(), 3);
        assert!(history.timestamp.is_empty());
    }

    #[test]
    fn filled_order_becomes_a_fill() {
        let order: AlpacaOrder = serde_json::from_str(
            r#"{
                "id": "abc",
                "symbol": "MSFT",
                "side": "sell",
                "status": "filled",
                "filled_qty": "5",
                "filled_avg_price": "400.25",
                "filled_at": "2026-07-15T14:30:00Z"
            }"#,
        )
        .unwrap();

        let Some(TradeRecord::Fill {
            symbol,
            side,
            quantity,
            price,
            ..
        }) = order.to_fill()
        else {
            panic!("filled order should convert");
        };
        assert_eq!(symbol, "MSFT");
        assert_eq!(side, TradeSide::Short);
        assert_eq!(quantity, Decimal::new(5, 0));
        assert_eq!(price, Decimal::new(40_025, 2));
    }

    #[test]
    fn unfilled_order_is_excluded() {
        let order: AlpacaOrder = serde_json::from_str(
            r#"{"id": "abc", "symbol": "MSFT", "status": "canceled"}"#,
        )
        .unwrap();
        assert!(order.to_fill().is_none());
    }

    #[test]
    fn filled_order_without_price_is_excluded() {
        let order: AlpacaOrder = serde_json::from_str(
            r#"{"id": "abc", "symbol": "MSFT", "status": "filled"}"#,
        )
        .unwrap();
        assert!(order.to_fill().is_none());
    }
}
