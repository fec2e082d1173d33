//! Screening categories and the per-symbol evaluator.
//!
//! Each category is a conjunction of fixed predicates over an
//! [`IndicatorBundle`] and the symbol's [`Fundamentals`]. Categories are
//! independent: one symbol can match any subset of them.

use std::fmt;

use crate::domain::config::ScreeningConfig;
use crate::domain::indicator::IndicatorBundle;
use crate::domain::series::Fundamentals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Deeply sold-off names turning up on heavy volume.
    Contrarian,
    /// Growing names with aligned averages and positive momentum.
    TrendFollowing,
    /// Low-priced names with a sudden volume surge ("buzz").
    LowPriceMomentum,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Contrarian,
        Category::TrendFollowing,
        Category::LowPriceMomentum,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Contrarian => "Contrarian",
            Category::TrendFollowing => "Trend-following",
            Category::LowPriceMomentum => "Low-price momentum",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category-specific display metrics, already rounded.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchDetail {
    Contrarian {
        /// Market cap in units of 100 million.
        market_cap_oku: f64,
        prev_change_pct: f64,
        long_decline_pct: f64,
        volume_ratio: f64,
    },
    TrendFollowing {
        growth_pct: f64,
        rsi: f64,
        volume_ratio: f64,
        golden_cross: bool,
    },
    LowPriceMomentum {
        price: f64,
        prev_change_pct: f64,
        volume_ratio: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub code: String,
    pub name: String,
    pub detail: MatchDetail,
}

impl MatchRecord {
    pub fn category(&self) -> Category {
        match self.detail {
            MatchDetail::Contrarian { .. } => Category::Contrarian,
            MatchDetail::TrendFollowing { .. } => Category::TrendFollowing,
            MatchDetail::LowPriceMomentum { .. } => Category::LowPriceMomentum,
        }
    }

    /// Column headers for a category's table, in display order.
    pub fn headers(category: Category) -> &'static [&'static str] {
        match category {
            Category::Contrarian => &[
                "Code",
                "Name",
                "Market Cap (100M)",
                "Prev Change %",
                "5Y Change %",
                "Volume Ratio",
            ],
            Category::TrendFollowing => &[
                "Code",
                "Name",
                "Growth Forecast %",
                "RSI",
                "Volume Ratio",
                "Golden Cross",
            ],
            Category::LowPriceMomentum => &[
                "Code",
                "Name",
                "Price",
                "Prev Change %",
                "Volume Ratio",
            ],
        }
    }

    /// Display cells aligned with [`MatchRecord::headers`].
    pub fn cells(&self) -> Vec<String> {
        let mut cells = vec![self.code.clone(), self.name.clone()];
        match &self.detail {
            MatchDetail::Contrarian {
                market_cap_oku,
                prev_change_pct,
                long_decline_pct,
                volume_ratio,
            } => {
                cells.push(format!("{market_cap_oku:.1}"));
                cells.push(format!("{prev_change_pct:.1}"));
                cells.push(format!("{long_decline_pct:.1}"));
                cells.push(format!("{volume_ratio:.2}"));
            }
            MatchDetail::TrendFollowing {
                growth_pct,
                rsi,
                volume_ratio,
                golden_cross,
            } => {
                cells.push(format!("{growth_pct:.1}"));
                cells.push(format!("{rsi:.1}"));
                cells.push(format!("{volume_ratio:.2}"));
                cells.push(if *golden_cross { "Yes" } else { "No" }.to_string());
            }
            MatchDetail::LowPriceMomentum {
                price,
                prev_change_pct,
                volume_ratio,
            } => {
                cells.push(format!("{price:.0}"));
                cells.push(format!("{prev_change_pct:.1}"));
                cells.push(format!("{volume_ratio:.2}"));
            }
        }
        cells
    }
}

/// Round to `decimals` places, ties to even (100.5 -> 100, 101.5 -> 102).
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

pub fn is_contrarian(bundle: &IndicatorBundle, config: &ScreeningConfig) -> bool {
    let rule = &config.contrarian;
    bundle.long_decline_pct <= rule.long_decline_min_pct
        && bundle.volume_ratio >= rule.volume_ratio_min
        && bundle.prev_change_pct > 0.0
        && bundle.ma_deviation_long_pct > 0.0
}

pub fn is_trend_following(
    bundle: &IndicatorBundle,
    fundamentals: &Fundamentals,
    config: &ScreeningConfig,
) -> bool {
    let rule = &config.trend;
    fundamentals.earnings_growth >= rule.growth_floor
        && bundle.golden_cross
        && bundle.macd_bullish
        && rule.rsi_band.contains_exclusive(bundle.rsi)
        && bundle.volume_ratio >= rule.volume_ratio_min
}

pub fn is_low_price_momentum(
    bundle: &IndicatorBundle,
    fundamentals: &Fundamentals,
    config: &ScreeningConfig,
) -> bool {
    let rule = &config.buzz;
    rule.price_band.contains(fundamentals.price)
        && bundle.volume_ratio >= rule.volume_ratio_min
        && bundle.prev_change_pct >= rule.prev_change_min_pct
        && bundle.ma_deviation_short_pct > 0.0
}

/// Evaluate all three categories for one symbol.
///
/// `code` is the display code (ticker without market suffix). Records come
/// back in [`Category::ALL`] order.
pub fn evaluate(
    code: &str,
    bundle: &IndicatorBundle,
    fundamentals: &Fundamentals,
    config: &ScreeningConfig,
) -> Vec<MatchRecord> {
    let mut records = Vec::new();
    let record = |detail| MatchRecord {
        code: code.to_string(),
        name: fundamentals.name.clone(),
        detail,
    };

    if is_contrarian(bundle, config) {
        records.push(record(MatchDetail::Contrarian {
            market_cap_oku: round_to(fundamentals.market_cap / 1e8, 1),
            prev_change_pct: round_to(bundle.prev_change_pct, 1),
            long_decline_pct: round_to(bundle.long_decline_pct, 1),
            volume_ratio: round_to(bundle.volume_ratio, 2),
        }));
    }

    if is_trend_following(bundle, fundamentals, config) {
        records.push(record(MatchDetail::TrendFollowing {
            growth_pct: round_to(fundamentals.earnings_growth * 100.0, 1),
            rsi: round_to(bundle.rsi, 1),
            volume_ratio: round_to(bundle.volume_ratio, 2),
            golden_cross: bundle.golden_cross,
        }));
    }

    if is_low_price_momentum(bundle, fundamentals, config) {
        records.push(record(MatchDetail::LowPriceMomentum {
            price: round_to(fundamentals.price, 0),
            prev_change_pct: round_to(bundle.prev_change_pct, 1),
            volume_ratio: round_to(bundle.volume_ratio, 2),
        }));
    }

    records
}

/// Matches for one run, one append-only list per category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    contrarian: Vec<MatchRecord>,
    trend_following: Vec<MatchRecord>,
    low_price_momentum: Vec<MatchRecord>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: MatchRecord) {
        match record.category() {
            Category::Contrarian => self.contrarian.push(record),
            Category::TrendFollowing => self.trend_following.push(record),
            Category::LowPriceMomentum => self.low_price_momentum.push(record),
        }
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = MatchRecord>) {
        for record in records {
            self.push(record);
        }
    }

    pub fn get(&self, category: Category) -> &[MatchRecord] {
        match category {
            Category::Contrarian => &self.contrarian,
            Category::TrendFollowing => &self.trend_following,
            Category::LowPriceMomentum => &self.low_price_momentum,
        }
    }

    /// Categories with their records, in fixed order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[MatchRecord])> {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn total(&self) -> usize {
        Category::ALL.iter().map(|&c| self.get(c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
