#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use kabuscreen::domain::error::ScreenerError;
use kabuscreen::domain::series::{Fundamentals, PriceBar, PriceSeries};
use kabuscreen::domain::strategy::ResultSet;
use kabuscreen::ports::data_port::{HistoryWindow, MarketDataPort};
use kabuscreen::ports::report_port::ReportPort;
use std::collections::HashMap;
use std::sync::Mutex;

pub struct MockMarketData {
    pub fundamentals: HashMap<String, Fundamentals>,
    pub history: HashMap<String, PriceSeries>,
    pub errors: HashMap<String, String>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self {
            fundamentals: HashMap::new(),
            history: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_symbol(
        mut self,
        symbol: &str,
        fundamentals: Fundamentals,
        series: PriceSeries,
    ) -> Self {
        self.fundamentals.insert(symbol.to_string(), fundamentals);
        self.history.insert(symbol.to_string(), series);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl MarketDataPort for MockMarketData {
    fn fetch_fundamentals(&self, symbol: &str) -> Result<Fundamentals, ScreenerError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(ScreenerError::DataFormat {
                symbol: symbol.to_string(),
                reason: reason.clone(),
            });
        }
        self.fundamentals
            .get(symbol)
            .cloned()
            .ok_or_else(|| ScreenerError::NoData {
                symbol: symbol.to_string(),
            })
    }

    fn fetch_history(
        &self,
        symbol: &str,
        window: HistoryWindow,
    ) -> Result<PriceSeries, ScreenerError> {
        let series = self.history.get(symbol).ok_or_else(|| ScreenerError::NoData {
            symbol: symbol.to_string(),
        })?;
        Ok(match window {
            HistoryWindow::Sessions(n) => series.tail(n),
            HistoryWindow::Years(years) => series.trailing_years(years),
        })
    }
}

/// Records every delivery instead of writing anything.
pub struct RecordingReport {
    pub deliveries: Mutex<Vec<(ResultSet, NaiveDateTime)>>,
}

impl RecordingReport {
    pub fn new() -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
        }
    }

    pub fn count(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }
}

impl ReportPort for RecordingReport {
    fn deliver(
        &self,
        results: &ResultSet,
        generated_at: NaiveDateTime,
    ) -> Result<(), ScreenerError> {
        self.deliveries
            .lock()
            .unwrap()
            .push((results.clone(), generated_at));
        Ok(())
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn run_time() -> NaiveDateTime {
    date(2024, 6, 14).and_hms_opt(17, 0, 0).unwrap()
}

/// One bar per calendar day starting 2023-01-01.
pub fn make_series(symbol: &str, closes: &[f64], volumes: &[i64]) -> PriceSeries {
    assert_eq!(closes.len(), volumes.len());
    let start = date(2023, 1, 1);
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
    PriceSeries::new(symbol, bars)
}

pub fn fundamentals(name: &str, market_cap: f64, price: f64, earnings_growth: f64) -> Fundamentals {
    Fundamentals {
        name: name.to_string(),
        market_cap,
        price,
        earnings_growth,
    }
}

/// 40 sessions rising 1% a day, then a 5.2% jump on the last one. The last
/// six sessions trade 76,000 shares against 1,000 before, a 4x volume ratio.
pub fn buzz_series(symbol: &str) -> PriceSeries {
    let mut closes: Vec<f64> = (0..39).map(|i| 100.0 * 1.01f64.powi(i)).collect();
    let last = closes[38] * 1.052;
    closes.push(last);
    let mut volumes = vec![1_000; 34];
    volumes.extend([76_000; 6]);
    make_series(symbol, &closes, &volumes)
}

/// 300 sessions: a linear slide from 2000 to 300, a choppy recovery
/// (+3 / -2.5 alternating) and a final 6% jump on 10x volume.
///
/// Ends near 347 with a long-window decline of about -83%, RSI about 73,
/// MACD above signal and MA25 above MA75.
pub fn rebound_series(symbol: &str) -> PriceSeries {
    let mut closes: Vec<f64> = (0..200)
        .map(|i| 2000.0 - 1700.0 * i as f64 / 199.0)
        .collect();
    let mut x = closes[199];
    for i in 0..99 {
        x += if i % 2 == 0 { 3.0 } else { -2.5 };
        closes.push(x);
    }
    closes.push(x * 1.06);
    let mut volumes = vec![1_000; 294];
    volumes.extend([10_000; 6]);
    make_series(symbol, &closes, &volumes)
}

pub fn flat_series(symbol: &str, len: usize, close: f64) -> PriceSeries {
    make_series(symbol, &vec![close; len], &vec![1_000; len])
}
