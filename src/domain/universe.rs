//! Symbol universe: list normalisation and the pre-evaluation gate.
//!
//! The gate removes a symbol from every category at once; it is not a
//! per-category predicate.

use std::collections::HashSet;
use std::fmt;

use crate::domain::config::ScreeningConfig;
use crate::domain::series::Fundamentals;

/// Keep tickers carrying `suffix`, trimmed, first occurrence only.
pub fn normalize_symbols<I, S>(raw: I, suffix: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut symbols = Vec::new();

    for entry in raw {
        let symbol = entry.as_ref().trim();
        if symbol.is_empty() || !symbol.ends_with(suffix) {
            continue;
        }
        if seen.insert(symbol.to_string()) {
            symbols.push(symbol.to_string());
        }
    }

    symbols
}

/// Ticker with the market suffix removed, e.g. `7203.T` -> `7203`.
pub fn display_code<'a>(symbol: &'a str, suffix: &str) -> &'a str {
    if suffix.is_empty() {
        return symbol;
    }
    symbol.strip_suffix(suffix).unwrap_or(symbol)
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    FetchFailed(String),
    BelowMarketCapFloor { market_cap: f64 },
    NoPrice,
    InsufficientHistory { sessions: usize, minimum: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FetchFailed(reason) => write!(f, "fetch failed: {reason}"),
            SkipReason::BelowMarketCapFloor { market_cap } => {
                write!(f, "market cap {market_cap} below floor")
            }
            SkipReason::NoPrice => write!(f, "no current price"),
            SkipReason::InsufficientHistory { sessions, minimum } => {
                write!(f, "only {sessions} sessions, minimum {minimum}")
            }
        }
    }
}

/// Market-cap floor and price presence, checked before any history is fetched.
pub fn gate_fundamentals(
    fundamentals: &Fundamentals,
    config: &ScreeningConfig,
) -> Result<(), SkipReason> {
    if fundamentals.market_cap.is_nan() || fundamentals.market_cap < config.market_cap_floor {
        return Err(SkipReason::BelowMarketCapFloor {
            market_cap: fundamentals.market_cap,
        });
    }
    if fundamentals.price == 0.0 {
        return Err(SkipReason::NoPrice);
    }
    Ok(())
}

pub fn gate_history(sessions: usize, config: &ScreeningConfig) -> Result<(), SkipReason> {
    if sessions < config.min_sessions {
        return Err(SkipReason::InsufficientHistory {
            sessions,
            minimum: config.min_sessions,
        });
    }
    Ok(())
}
