//! Equity time-series normalization.

/// Pair raw equity values with their timestamps and drop unusable points.
///
/// The brokerage history endpoint returns two parallel arrays which may
/// contain nulls. Pairs are matched by index up to the shorter length; a
/// pair survives only if the equity value is finite and strictly positive
/// and the timestamp is present. Input order is preserved; the feed is
/// assumed chronologically ascending and is not re-sorted.
///
/// Fewer than 2 surviving pairs means "insufficient data"; callers check
/// the length rather than receiving an error.
#[must_use]
pub fn normalize(values: &[Option<f64>], timestamps: &[Option<i64>]) -> Vec<(f64, i64)> {
    values
        .iter()
        .zip(timestamps.iter())
        .filter_map(|(value, timestamp)| {
            let equity = (*value)?;
            let ts = (*timestamp)?;
            if equity.is_finite() && equity > 0.0 {
                Some((equity, ts))
            } else {
                None
            }
        })
        .collect()
}
