//! MACD (Moving Average Convergence Divergence).
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! All three EMAs are seeded with their first input (see [`ema_series`]).

use crate::domain::config::MacdSpans;
use crate::domain::indicator::ema_series;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdPoint {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// MACD values at the last session, or `None` for empty input or a zero span.
pub fn macd_last(closes: &[f64], spans: MacdSpans) -> Option<MacdPoint> {
    if closes.is_empty() || spans.fast == 0 || spans.slow == 0 || spans.signal == 0 {
        return None;
    }

    let fast = ema_series(closes, spans.fast);
    let slow = ema_series(closes, spans.slow);
    let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal = ema_series(&line, spans.signal);

    let line = *line.last()?;
    let signal = *signal.last()?;
    Some(MacdPoint {
        line,
        signal,
        histogram: line - signal,
    })
}

/// True when the MACD line sits above its signal line at the last session.
pub fn macd_bullish(closes: &[f64], spans: MacdSpans) -> bool {
    macd_last(closes, spans).is_some_and(|p| p.line > p.signal)
}
