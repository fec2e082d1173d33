//! Per-symbol indicator snapshot.

use crate::domain::config::IndicatorParams;
use crate::domain::indicator::{
    decline_over_window, golden_cross, ma_deviation, macd_bullish, previous_change, rsi,
    volume_ratio,
};
use crate::domain::series::PriceSeries;

/// Indicators for one symbol at the last recent session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorBundle {
    pub volume_ratio: f64,
    pub prev_change_pct: f64,
    pub ma_deviation_long_pct: f64,
    pub ma_deviation_short_pct: f64,
    pub long_decline_pct: f64,
    pub rsi: f64,
    pub macd_bullish: bool,
    pub golden_cross: bool,
}

impl IndicatorBundle {
    /// Short-horizon indicators come from `recent`. The long-window decline
    /// compares the last recent close with the first close of `long`, and the
    /// moving-average alignment runs over `long` since its 75- and 200-session
    /// averages need more history than the recent window holds.
    pub fn compute(recent: &PriceSeries, long: &PriceSeries, params: &IndicatorParams) -> Self {
        let closes = recent.closes();
        let volumes = recent.volumes();
        let long_closes = long.closes();
        let current = recent.last_close().unwrap_or(0.0);

        Self {
            volume_ratio: volume_ratio(&volumes, params.volume_ratio_windows),
            prev_change_pct: previous_change(&closes),
            ma_deviation_long_pct: ma_deviation(&closes, params.ma_spans.deviation_long),
            ma_deviation_short_pct: ma_deviation(&closes, params.ma_spans.deviation_short),
            long_decline_pct: decline_over_window(
                current,
                &long_closes,
                params.long_decline_window.min_sessions,
            ),
            rsi: rsi(&closes, params.rsi_period),
            macd_bullish: macd_bullish(&closes, params.macd_spans),
            golden_cross: golden_cross(&long_closes, &params.ma_spans.cross_pairs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::series::PriceBar;
    use chrono::NaiveDate;

    fn series(closes: &[f64], volumes: &[i64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let bars = closes
            .iter()
            .zip(volumes)
            .enumerate()
            .map(|(i, (&close, &volume))| PriceBar {
                date: start + chrono::Duration::days(i as i64),
                close,
                volume,
            })
            .collect();
        PriceSeries::new("TEST.T", bars)
    }

    #[test]
    fn bundle_on_empty_series_is_neutral() {
        let empty = PriceSeries::default();
        let bundle = IndicatorBundle::compute(&empty, &empty, &IndicatorParams::default());
        assert_eq!(bundle.volume_ratio, 0.0);
        assert_eq!(bundle.prev_change_pct, 0.0);
        assert_eq!(bundle.ma_deviation_long_pct, 0.0);
        assert_eq!(bundle.long_decline_pct, 0.0);
        assert_eq!(bundle.rsi, 50.0);
        assert!(!bundle.macd_bullish);
        assert!(!bundle.golden_cross);
    }

    #[test]
    fn bundle_uses_long_window_for_decline_and_alignment() {
        let long_closes: Vec<f64> = (0..300).map(|i| 1000.0 - i as f64 * 2.0).collect();
        let long = series(&long_closes, &vec![1000; 300]);
        let recent = long.tail(40);
        let bundle = IndicatorBundle::compute(&recent, &long, &IndicatorParams::default());

        // last close 402 against a first close of 1000
        assert!((bundle.long_decline_pct + 59.8).abs() < 1e-9);
        assert!(!bundle.golden_cross);
        assert!((bundle.volume_ratio - 1.0).abs() < f64::EPSILON);
        assert!(bundle.rsi.abs() < f64::EPSILON);
    }

    #[test]
    fn bundle_is_deterministic() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let volumes: Vec<i64> = (0..40).map(|i| 1000 + i * 10).collect();
        let recent = series(&closes, &volumes);
        let params = IndicatorParams::default();
        assert_eq!(
            IndicatorBundle::compute(&recent, &recent, &params),
            IndicatorBundle::compute(&recent, &recent, &params)
        );
    }
}
