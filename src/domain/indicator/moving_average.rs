//! Simple moving averages, deviation from the average and the long-term
//! alignment check.

/// Mean of the trailing `period` values; `None` when there are fewer.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Percent distance of the last close from its trailing `period` SMA.
///
/// Returns 0 when the average is 0 or cannot be computed yet.
pub fn ma_deviation(closes: &[f64], period: usize) -> f64 {
    match (sma(closes, period), closes.last()) {
        (Some(ma), Some(&last)) if ma != 0.0 => (last - ma) / ma * 100.0,
        _ => 0.0,
    }
}

/// True when any `(shorter, longer)` pair has its shorter SMA above the
/// longer one. A pair whose longer average is missing or 0 never counts.
///
/// With the default pairs this reads MA25 > MA75 or MA50 > MA200, a
/// long-horizon upward alignment rather than the short 5/25 crossover.
pub fn golden_cross(closes: &[f64], pairs: &[(usize, usize)]) -> bool {
    pairs.iter().any(|&(short, long)| {
        match (sma(closes, short), sma(closes, long)) {
            (Some(fast), Some(slow)) if slow != 0.0 => fast > slow,
            _ => false,
        }
    })
}
