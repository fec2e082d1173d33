//! Point-to-point price changes.

/// Percent change of the last close against the one before it.
pub fn previous_change(closes: &[f64]) -> f64 {
    match closes {
        [.., prev, last] if *prev != 0.0 => (last - prev) / prev * 100.0,
        _ => 0.0,
    }
}

/// Percent change from the first close of a long lookback window to
/// `current_close`.
///
/// Windows shorter than `min_sessions` yield 0, as does a zero first close.
pub fn decline_over_window(current_close: f64, long_window: &[f64], min_sessions: usize) -> f64 {
    if long_window.len() < min_sessions {
        return 0.0;
    }
    match long_window.first() {
        Some(&first) if first != 0.0 => (current_close / first - 1.0) * 100.0,
        _ => 0.0,
    }
}
