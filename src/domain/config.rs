//! Screening thresholds and indicator parameters.
//!
//! Defaults reproduce the daily screen: a 50 billion market-cap floor, a
//! 40-session recent window, a five-year decline window and the category
//! thresholds below.

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub low: f64,
    pub high: f64,
}

impl Band {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    /// Both bounds excluded.
    pub fn contains_exclusive(&self, value: f64) -> bool {
        value > self.low && value < self.high
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeWindows {
    pub short: usize,
    pub long: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacdSpans {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

/// Moving-average periods used for deviation and the alignment check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaSpans {
    pub deviation_long: usize,
    pub deviation_short: usize,
    /// (shorter, longer) pairs; any pair with shorter > longer counts as aligned.
    pub cross_pairs: [(usize, usize); 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongDeclineWindow {
    pub years: u32,
    /// Fewer observations than this yields a decline of 0.
    pub min_sessions: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorParams {
    pub volume_ratio_windows: VolumeWindows,
    pub rsi_period: usize,
    pub macd_spans: MacdSpans,
    pub ma_spans: MaSpans,
    pub long_decline_window: LongDeclineWindow,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            volume_ratio_windows: VolumeWindows { short: 6, long: 25 },
            rsi_period: 14,
            macd_spans: MacdSpans {
                fast: 12,
                slow: 26,
                signal: 9,
            },
            ma_spans: MaSpans {
                deviation_long: 25,
                deviation_short: 5,
                cross_pairs: [(25, 75), (50, 200)],
            },
            long_decline_window: LongDeclineWindow {
                years: 5,
                min_sessions: 200,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrarianRule {
    /// Decline over the long window must be at or below this percentage.
    pub long_decline_min_pct: f64,
    pub volume_ratio_min: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendRule {
    pub growth_floor: f64,
    /// Exclusive RSI band.
    pub rsi_band: Band,
    pub volume_ratio_min: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuzzRule {
    /// Inclusive price band.
    pub price_band: Band,
    pub volume_ratio_min: f64,
    pub prev_change_min_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningConfig {
    pub market_cap_floor: f64,
    /// Symbols with fewer recent sessions are skipped before evaluation.
    pub min_sessions: usize,
    /// Length of the recent window fed to the short-horizon indicators.
    pub recent_sessions: usize,
    pub workers: usize,
    pub indicators: IndicatorParams,
    pub contrarian: ContrarianRule,
    pub trend: TrendRule,
    pub buzz: BuzzRule,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            market_cap_floor: 50_000_000_000.0,
            min_sessions: 25,
            recent_sessions: 40,
            workers: 1,
            indicators: IndicatorParams::default(),
            contrarian: ContrarianRule {
                long_decline_min_pct: -50.0,
                volume_ratio_min: 2.0,
            },
            trend: TrendRule {
                growth_floor: 0.10,
                rsi_band: Band::new(50.0, 80.0),
                volume_ratio_min: 1.5,
            },
            buzz: BuzzRule {
                price_band: Band::new(100.0, 1000.0),
                volume_ratio_min: 3.0,
                prev_change_min_pct: 5.0,
            },
        }
    }
}
