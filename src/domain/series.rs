//! Daily price/volume series and the point-in-time fundamentals snapshot.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: i64,
}

/// Chronological sequence of daily bars for one symbol.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    pub symbol: String,
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume as f64).collect()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }

    /// The trailing `sessions` bars.
    pub fn tail(&self, sessions: usize) -> PriceSeries {
        let start = self.bars.len().saturating_sub(sessions);
        PriceSeries {
            symbol: self.symbol.clone(),
            bars: self.bars[start..].to_vec(),
        }
    }

    /// Bars dated on or after `years` calendar years before the last bar.
    ///
    /// A span reaching past the calendar keeps every bar.
    pub fn trailing_years(&self, years: u32) -> PriceSeries {
        let Some(last) = self.last_date() else {
            return self.clone();
        };
        let cutoff = years
            .checked_mul(12)
            .and_then(|months| last.checked_sub_months(chrono::Months::new(months)))
            .unwrap_or(NaiveDate::MIN);
        PriceSeries {
            symbol: self.symbol.clone(),
            bars: self
                .bars
                .iter()
                .filter(|b| b.date >= cutoff)
                .cloned()
                .collect(),
        }
    }
}

/// Company snapshot at evaluation time. Absent provider fields are 0 / empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fundamentals {
    pub name: String,
    pub market_cap: f64,
    pub price: f64,
    /// Forward earnings growth as a fraction (0.10 = 10%).
    pub earnings_growth: f64,
}
