//! RSI (Relative Strength Index) over simple rolling means.
//!
//! avg_gain = mean of positive deltas over the last n changes
//! avg_loss = mean of |negative deltas| over the last n changes
//! RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//!
//! No Wilder smoothing: each value depends only on the last n changes.
//! If avg_loss == 0 and avg_gain > 0: RSI = 100.
//! If both are 0 (flat window): RSI = 50.
//! Fewer than n + 1 closes: RSI = 50.

pub const NEUTRAL_RSI: f64 = 50.0;

pub fn rsi(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() < period + 1 {
        return NEUTRAL_RSI;
    }

    let window = &closes[closes.len() - period - 1..];
    let mut gain = 0.0;
    let mut loss = 0.0;
    for pair in window.windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gain += change;
        } else if change < 0.0 {
            loss -= change;
        }
    }
    let avg_gain = gain / period as f64;
    let avg_loss = loss / period as f64;

    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            NEUTRAL_RSI
        } else {
            100.0
        }
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}
