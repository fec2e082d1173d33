//! Market data access port.

use crate::domain::error::ScreenerError;
use crate::domain::series::{Fundamentals, PriceSeries};

/// How much history to fetch for a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryWindow {
    /// The trailing N trading sessions.
    Sessions(usize),
    /// Every session within N calendar years of the latest one.
    Years(u32),
}

pub trait MarketDataPort {
    fn fetch_fundamentals(&self, symbol: &str) -> Result<Fundamentals, ScreenerError>;

    fn fetch_history(
        &self,
        symbol: &str,
        window: HistoryWindow,
    ) -> Result<PriceSeries, ScreenerError>;
}
