//! Screening loop over the symbol universe.
//!
//! Each symbol resolves to a [`SymbolOutcome`]. A skipped symbol never
//! contributes a record; the loop moves on to the next symbol. Fetch
//! failures are terminal for the symbol and are not retried.

use rayon::prelude::*;

use crate::domain::config::ScreeningConfig;
use crate::domain::error::ScreenerError;
use crate::domain::indicator::IndicatorBundle;
use crate::domain::series::Fundamentals;
use crate::domain::strategy::{self, MatchRecord, ResultSet};
use crate::domain::universe::{self, SkipReason};
use crate::ports::data_port::{HistoryWindow, MarketDataPort};

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedSymbol {
    pub symbol: String,
    pub fundamentals: Fundamentals,
    pub bundle: IndicatorBundle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SymbolOutcome {
    Evaluated(EvaluatedSymbol),
    Skipped { symbol: String, reason: SkipReason },
}

/// Results of one run plus skip tallies for the summary log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenReport {
    pub results: ResultSet,
    pub evaluated: usize,
    pub skipped: Vec<(String, SkipReason)>,
}

/// Fetch and compute everything needed to evaluate `symbol`.
pub fn evaluate_symbol(
    data: &dyn MarketDataPort,
    symbol: &str,
    config: &ScreeningConfig,
) -> SymbolOutcome {
    match collect(data, symbol, config) {
        Ok(evaluated) => SymbolOutcome::Evaluated(evaluated),
        Err(reason) => SymbolOutcome::Skipped {
            symbol: symbol.to_string(),
            reason,
        },
    }
}

fn collect(
    data: &dyn MarketDataPort,
    symbol: &str,
    config: &ScreeningConfig,
) -> Result<EvaluatedSymbol, SkipReason> {
    let fetch_failed = |e: ScreenerError| SkipReason::FetchFailed(e.to_string());

    let fundamentals = data.fetch_fundamentals(symbol).map_err(fetch_failed)?;
    universe::gate_fundamentals(&fundamentals, config)?;

    let recent = data
        .fetch_history(symbol, HistoryWindow::Sessions(config.recent_sessions))
        .map_err(fetch_failed)?;
    universe::gate_history(recent.len(), config)?;

    let long = data
        .fetch_history(
            symbol,
            HistoryWindow::Years(config.indicators.long_decline_window.years),
        )
        .map_err(fetch_failed)?;

    let bundle = IndicatorBundle::compute(&recent, &long, &config.indicators);

    Ok(EvaluatedSymbol {
        symbol: symbol.to_string(),
        fundamentals,
        bundle,
    })
}

/// Match records for an evaluated symbol; empty for a skipped one.
pub fn records_for(
    outcome: &SymbolOutcome,
    suffix: &str,
    config: &ScreeningConfig,
) -> Vec<MatchRecord> {
    match outcome {
        SymbolOutcome::Evaluated(e) => strategy::evaluate(
            universe::display_code(&e.symbol, suffix),
            &e.bundle,
            &e.fundamentals,
            config,
        ),
        SymbolOutcome::Skipped { .. } => Vec::new(),
    }
}

/// Screen `symbols` one at a time, in order.
pub fn screen(
    data: &dyn MarketDataPort,
    symbols: &[String],
    suffix: &str,
    config: &ScreeningConfig,
) -> ScreenReport {
    let outcomes = symbols
        .iter()
        .map(|symbol| evaluate_symbol(data, symbol, config));
    accumulate(outcomes, suffix, config)
}

/// Screen `symbols` on a pool of `config.workers` threads.
///
/// Outcomes are gathered in symbol order, so the report is identical to
/// [`screen`] over the same data.
pub fn screen_parallel(
    data: &(dyn MarketDataPort + Sync),
    symbols: &[String],
    suffix: &str,
    config: &ScreeningConfig,
) -> ScreenReport {
    if config.workers <= 1 {
        return screen(data, symbols, suffix, config);
    }

    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!(error = %e, "thread pool unavailable, screening sequentially");
            return screen(data, symbols, suffix, config);
        }
    };

    let outcomes: Vec<SymbolOutcome> = pool.install(|| {
        symbols
            .par_iter()
            .map(|symbol| evaluate_symbol(data, symbol, config))
            .collect()
    });
    accumulate(outcomes, suffix, config)
}

fn accumulate(
    outcomes: impl IntoIterator<Item = SymbolOutcome>,
    suffix: &str,
    config: &ScreeningConfig,
) -> ScreenReport {
    let mut report = ScreenReport::default();

    for outcome in outcomes {
        let records = records_for(&outcome, suffix, config);
        match outcome {
            SymbolOutcome::Evaluated(e) => {
                report.evaluated += 1;
                for record in &records {
                    tracing::info!(symbol = %e.symbol, category = %record.category(), "match");
                }
                report.results.extend(records);
            }
            SymbolOutcome::Skipped { symbol, reason } => {
                tracing::debug!(%symbol, %reason, "skipped");
                report.skipped.push((symbol, reason));
            }
        }
    }

    report
}
