//! Rebasing a value series to percent change from its first observation.

/// Express a series as percent change relative to its own first element.
///
/// `out[i] = (series[i] / series[0] - 1) * 100`, so every curve starts at
/// zero and series with different absolute scales share one axis.
///
/// An empty series, or one whose anchor is not strictly positive, cannot be
/// rebased and returns an empty vector. Callers treat an empty result as
/// "omit this line from the chart", not as an error.
#[must_use]
pub fn rebase(series: &[f64]) -> Vec<f64> {
    let Some(&anchor) = series.first() else {
        return Vec::new();
    };
    if !(anchor > 0.0) || !anchor.is_finite() {
        return Vec::new();
    }

    series.iter().map(|v| (v / anchor - 1.0) * 100.0).collect()
}
