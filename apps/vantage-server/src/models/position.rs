//! Open position snapshots.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::broker::AlpacaPosition;

/// An open position, normalized for display.
///
/// Built from the raw brokerage shape in one place; every numeric field
/// defaults to zero when the upstream value is missing or unparseable, so
/// the rendering layer never sees a null.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Instrument symbol.
    pub symbol: String,
    /// Number of shares held (fractional allowed).
    pub quantity: Decimal,
    /// Current market value of the position.
    pub market_value: Decimal,
    /// Unrealized profit or loss.
    #[serde(rename = "unrealizedPL")]
    pub unrealized_pl: Decimal,
    /// Average entry price.
    pub entry_price: Decimal,
    /// Latest price per share.
    pub current_price: Decimal,
}

impl Position {
    /// Normalize a raw brokerage position.
    ///
    /// When the upstream omits `current_price` it is derived as
    /// `market_value / quantity` for non-zero quantity, else zero.
    #[must_use]
    pub fn from_api(raw: &AlpacaPosition) -> Self {
        let quantity = parse_or_zero(raw.qty.as_deref());
        let market_value = parse_or_zero(raw.market_value.as_deref());

        let current_price = raw
            .current_price
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| {
                if quantity > Decimal::ZERO {
                    market_value / quantity
                } else {
                    Decimal::ZERO
                }
            });

        Self {
            symbol: raw.symbol.clone(),
            quantity,
            market_value,
            unrealized_pl: parse_or_zero(raw.unrealized_pl.as_deref()),
            entry_price: parse_or_zero(raw.avg_entry_price.as_deref()),
            current_price,
        }
    }
}

/// Parse a string-encoded decimal, coercing absent or malformed to zero.
fn parse_or_zero(value: Option<&str>) -> Decimal {
    value.and_then(|s| s.parse().ok()).unwrap_or(Decimal::ZERO)
}
