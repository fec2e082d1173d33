//! CSV file market data adapter.
//!
//! Layout under the base directory:
//! - `fundamentals.csv`: `symbol,name,market_cap,price,current_price,earnings_growth`
//! - `<symbol>.csv`: one row per session with at least `date,close,volume`
//!
//! Blank or unparsable fundamentals read as 0. Extra price columns are ignored.

use crate::domain::error::ScreenerError;
use crate::domain::series::{Fundamentals, PriceBar, PriceSeries};
use crate::ports::data_port::{HistoryWindow, MarketDataPort};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const FUNDAMENTALS_FILE: &str = "fundamentals.csv";

pub struct CsvMarketData {
    base_path: PathBuf,
    fundamentals: HashMap<String, Fundamentals>,
}

impl CsvMarketData {
    /// Load `fundamentals.csv` from `base_path`; price files are read lazily.
    pub fn open(base_path: PathBuf) -> Result<Self, ScreenerError> {
        let path = base_path.join(FUNDAMENTALS_FILE);
        let content = fs::read_to_string(&path).map_err(|e| ScreenerError::DataFormat {
            symbol: FUNDAMENTALS_FILE.to_string(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        let fundamentals = parse_fundamentals(&content)?;
        Ok(Self {
            base_path,
            fundamentals,
        })
    }

    fn price_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn read_prices(&self, symbol: &str) -> Result<PriceSeries, ScreenerError> {
        let path = self.price_path(symbol);
        let content = fs::read_to_string(&path).map_err(|_| ScreenerError::NoData {
            symbol: symbol.to_string(),
        })?;
        parse_prices(symbol, &content)
    }
}

impl MarketDataPort for CsvMarketData {
    fn fetch_fundamentals(&self, symbol: &str) -> Result<Fundamentals, ScreenerError> {
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
        let series = self.read_prices(symbol)?;
        Ok(match window {
            HistoryWindow::Sessions(n) => series.tail(n),
            HistoryWindow::Years(years) => series.trailing_years(years),
        })
    }
}

/// Read the `symbol` column of a symbol-list CSV, in file order.
pub fn load_symbol_list(path: &Path) -> Result<Vec<String>, ScreenerError> {
    let list_error = |reason: String| ScreenerError::SymbolList {
        file: path.display().to_string(),
        reason,
    };

    let content = fs::read_to_string(path).map_err(|e| list_error(e.to_string()))?;
    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let headers = rdr
        .headers()
        .map_err(|e| list_error(format!("CSV parse error: {}", e)))?
        .clone();
    let column = column_index(&headers, "symbol")
        .ok_or_else(|| list_error("missing symbol column".into()))?;

    let mut symbols = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| list_error(format!("CSV parse error: {}", e)))?;
        if let Some(symbol) = record.get(column) {
            symbols.push(symbol.to_string());
        }
    }
    Ok(symbols)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

/// Parse a provider number; blanks, garbage and non-finite values are 0.
fn parse_amount(value: Option<&str>) -> f64 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn parse_fundamentals(content: &str) -> Result<HashMap<String, Fundamentals>, ScreenerError> {
    let format_error = |reason: String| ScreenerError::DataFormat {
        symbol: FUNDAMENTALS_FILE.to_string(),
        reason,
    };

    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let headers = rdr
        .headers()
        .map_err(|e| format_error(format!("CSV parse error: {}", e)))?
        .clone();
    let symbol_col = column_index(&headers, "symbol")
        .ok_or_else(|| format_error("missing symbol column".into()))?;
    let col = |name: &str| column_index(&headers, name);
    let (name_col, cap_col, price_col, current_col, growth_col) = (
        col("name"),
        col("market_cap"),
        col("price"),
        col("current_price"),
        col("earnings_growth"),
    );

    let mut map = HashMap::new();
    for result in rdr.records() {
        let record = result.map_err(|e| format_error(format!("CSV parse error: {}", e)))?;
        let Some(symbol) = record.get(symbol_col).map(str::trim).filter(|s| !s.is_empty())
        else {
            continue;
        };
        let field = |c: Option<usize>| c.and_then(|i| record.get(i));

        let mut price = parse_amount(field(price_col));
        if price == 0.0 {
            price = parse_amount(field(current_col));
        }

        map.insert(
            symbol.to_string(),
            Fundamentals {
                name: field(name_col).unwrap_or_default().trim().to_string(),
                market_cap: parse_amount(field(cap_col)),
                price,
                earnings_growth: parse_amount(field(growth_col)),
            },
        );
    }
    Ok(map)
}

fn parse_prices(symbol: &str, content: &str) -> Result<PriceSeries, ScreenerError> {
    let format_error = |reason: String| ScreenerError::DataFormat {
        symbol: symbol.to_string(),
        reason,
    };

    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let headers = rdr
        .headers()
        .map_err(|e| format_error(format!("CSV parse error: {}", e)))?
        .clone();
    let column = |name: &str| {
        column_index(&headers, name).ok_or_else(|| format_error(format!("missing {} column", name)))
    };
    let date_col = column("date")?;
    let close_col = column("close")?;
    let volume_col = column("volume")?;

    let mut bars = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| format_error(format!("CSV parse error: {}", e)))?;

        let date_str = record.get(date_col).unwrap_or_default().trim();
        // Provider exports sometimes carry a time component.
        let date_str = date_str.get(..10).unwrap_or(date_str);
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|e| format_error(format!("invalid date format: {}", e)))?;

        let close: f64 = record
            .get(close_col)
            .unwrap_or_default()
            .trim()
            .parse()
            .map_err(|e| format_error(format!("invalid close value: {}", e)))?;

        let volume: f64 = record
            .get(volume_col)
            .unwrap_or_default()
            .trim()
            .parse()
            .map_err(|e| format_error(format!("invalid volume value: {}", e)))?;

        bars.push(PriceBar {
            date,
            close,
            volume: volume as i64,
        });
    }

    Ok(PriceSeries::new(symbol, bars))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        fs::write(
            path.join(FUNDAMENTALS_FILE),
            "symbol,name,market_cap,price,current_price,earnings_growth\n\
             7203.T,Toyota Motor,40000000000000,2900,,0.12\n\
             6758.T,Sony Group,,,3100,\n\
             9999.T,Odd Corp,abc,nan,0,inf\n",
        )
        .unwrap();

        fs::write(
            path.join("7203.T.csv"),
            "date,open,high,low,close,volume\n\
             2024-01-17,110.0,120.0,105.0,115.0,55000\n\
             2024-01-15,100.0,110.0,90.0,105.0,50000\n\
             2024-01-16,105.0,115.0,100.0,110.0,60000.0\n",
        )
        .unwrap();

        (dir, path)
    }

    #[test]
    fn fetch_fundamentals_reads_fields() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvMarketData::open(path).unwrap();

        let toyota = adapter.fetch_fundamentals("7203.T").unwrap();
        assert_eq!(toyota.name, "Toyota Motor");
        assert_eq!(toyota.market_cap, 40_000_000_000_000.0);
        assert_eq!(toyota.price, 2900.0);
        assert_eq!(toyota.earnings_growth, 0.12);
    }

    #[test]
    fn fetch_fundamentals_missing_fields_are_zero() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvMarketData::open(path).unwrap();

        let sony = adapter.fetch_fundamentals("6758.T").unwrap();
        assert_eq!(sony.market_cap, 0.0);
        assert_eq!(sony.price, 3100.0, "falls back to current_price");
        assert_eq!(sony.earnings_growth, 0.0);

        let odd = adapter.fetch_fundamentals("9999.T").unwrap();
        assert_eq!(odd.market_cap, 0.0);
        assert_eq!(odd.price, 0.0);
        assert_eq!(odd.earnings_growth, 0.0);
    }

    #[test]
    fn fetch_fundamentals_unknown_symbol() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvMarketData::open(path).unwrap();
        assert!(matches!(
            adapter.fetch_fundamentals("1111.T"),
            Err(ScreenerError::NoData { .. })
        ));
    }

    #[test]
    fn fetch_history_sorted_and_windowed() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvMarketData::open(path).unwrap();

        let all = adapter
            .fetch_history("7203.T", HistoryWindow::Years(5))
            .unwrap();
        assert_eq!(all.closes(), vec![105.0, 110.0, 115.0]);
        assert_eq!(all.bars[1].volume, 60000);

        let recent = adapter
            .fetch_history("7203.T", HistoryWindow::Sessions(2))
            .unwrap();
        assert_eq!(recent.closes(), vec![110.0, 115.0]);
    }

    #[test]
    fn fetch_history_missing_file_is_no_data() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvMarketData::open(path).unwrap();
        assert!(matches!(
            adapter.fetch_history("6758.T", HistoryWindow::Sessions(40)),
            Err(ScreenerError::NoData { .. })
        ));
    }

    #[test]
    fn fetch_history_bad_close_is_format_error() {
        let (_dir, path) = setup_test_data();
        fs::write(path.join("6758.T.csv"), "date,close,volume\n2024-01-15,abc,100\n").unwrap();
        let adapter = CsvMarketData::open(path).unwrap();
        assert!(matches!(
            adapter.fetch_history("6758.T", HistoryWindow::Sessions(40)),
            Err(ScreenerError::DataFormat { .. })
        ));
    }

    #[test]
    fn parse_prices_accepts_timestamps() {
        let series = parse_prices(
            "X",
            "Date,Close,Volume\n2024-01-15 00:00:00+09:00,100.5,1200\n",
        )
        .unwrap();
        assert_eq!(
            series.last_date(),
            Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
    }

    #[test]
    fn open_without_fundamentals_fails() {
        let dir = TempDir::new().unwrap();
        assert!(CsvMarketData::open(dir.path().to_path_buf()).is_err());
    }

    #[test]
    fn load_symbol_list_reads_symbol_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("symbols.csv");
        fs::write(&path, "name,symbol\nToyota,7203.T\nApple,AAPL\nSony,6758.T\n").unwrap();
        assert_eq!(
            load_symbol_list(&path).unwrap(),
            vec!["7203.T", "AAPL", "6758.T"]
        );
    }

    #[test]
    fn load_symbol_list_requires_symbol_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("symbols.csv");
        fs::write(&path, "ticker\n7203.T\n").unwrap();
        assert!(matches!(
            load_symbol_list(&path),
            Err(ScreenerError::SymbolList { .. })
        ));
    }

    #[test]
    fn load_symbol_list_missing_file() {
        assert!(load_symbol_list(Path::new("/nonexistent/symbols.csv")).is_err());
    }
}
