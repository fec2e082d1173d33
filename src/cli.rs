//! CLI definition and dispatch.

use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::{load_symbol_list, CsvMarketData};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::html_report_adapter::HtmlReportAdapter;
use crate::domain::config::{
    Band, BuzzRule, ContrarianRule, IndicatorParams, LongDeclineWindow, MacdSpans, MaSpans,
    ScreeningConfig, TrendRule, VolumeWindows,
};
use crate::domain::config_validation::validate_screening_config;
use crate::domain::error::ScreenerError;
use crate::domain::screening::{self, ScreenReport, SymbolOutcome};
use crate::domain::strategy::{Category, ResultSet};
use crate::domain::universe::{display_code, normalize_symbols};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::MarketDataPort;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_SUFFIX: &str = ".T";
pub const DEFAULT_OUTPUT: &str = "screening_report.html";

#[derive(Parser, Debug)]
#[command(name = "kabuscreen", about = "Daily equity screener")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Screen the symbol universe and write a report when anything matches
    Screen {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        symbols: Option<PathBuf>,
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        workers: Option<usize>,
    },
    /// Show fundamentals, indicators and matching categories for one symbol
    Inspect {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: String,
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// Validate a screening configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// File locations for a run, after command-line overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSettings {
    pub symbols_path: PathBuf,
    pub data_dir: PathBuf,
    pub suffix: String,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub symbols: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub workers: Option<usize>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Screen {
            config,
            symbols,
            data_dir,
            output,
            workers,
        } => run_screen(
            &config,
            Overrides {
                symbols,
                data_dir,
                output,
                workers,
            },
        ),
        Command::Inspect {
            config,
            symbol,
            data_dir,
        } => run_inspect(&config, &symbol, data_dir),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ScreenerError> {
    FileConfigAdapter::from_file(path)
}

fn fail(err: ScreenerError) -> ExitCode {
    tracing::error!("{err}");
    eprintln!("error: {err}");
    (&err).into()
}

fn run_screen(config_path: &PathBuf, overrides: Overrides) -> ExitCode {
    match screen_from_config(config_path, &overrides, Local::now().naive_local()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}

/// Full screening run: config, universe, screening loop, report.
pub fn screen_from_config(
    config_path: &PathBuf,
    overrides: &Overrides,
    generated_at: NaiveDateTime,
) -> Result<ScreenReport, ScreenerError> {
    // Stage 1: Load and validate config
    tracing::info!(path = %config_path.display(), "loading config");
    let adapter = load_config(config_path)?;
    let mut config = build_screening_config(&adapter)?;
    if let Some(workers) = overrides.workers {
        if workers == 0 {
            return Err(ScreenerError::ConfigInvalid {
                section: "screening".into(),
                key: "workers".into(),
                reason: "workers must be at least 1".into(),
            });
        }
        config.workers = workers;
    }
    let settings = resolve_data_settings(&adapter, overrides)?;

    // Stage 2: Load the universe
    let raw = load_symbol_list(&settings.symbols_path)?;
    let symbols = normalize_symbols(&raw, &settings.suffix);
    tracing::info!(
        listed = raw.len(),
        screened = symbols.len(),
        suffix = %settings.suffix,
        "universe loaded"
    );

    // Stage 3: Screen
    let data = CsvMarketData::open(settings.data_dir.clone())?;
    let report = HtmlReportAdapter::new(settings.output_path.clone());
    run_screen_pipeline(
        &data,
        &symbols,
        &settings.suffix,
        &config,
        &report,
        generated_at,
    )
}

/// Screen `symbols` and hand the results to `report` when anything matched.
pub fn run_screen_pipeline(
    data: &(dyn MarketDataPort + Sync),
    symbols: &[String],
    suffix: &str,
    config: &ScreeningConfig,
    report: &dyn ReportPort,
    generated_at: NaiveDateTime,
) -> Result<ScreenReport, ScreenerError> {
    let outcome = screening::screen_parallel(data, symbols, suffix, config);

    tracing::info!(
        evaluated = outcome.evaluated,
        skipped = outcome.skipped.len(),
        matches = outcome.results.total(),
        "screening finished"
    );
    print_summary(&outcome.results);

    if deliver_if_matches(report, &outcome.results, generated_at)? {
        eprintln!("Matches found, report delivered");
    } else {
        eprintln!("No matches");
    }
    Ok(outcome)
}

/// Deliver only when at least one category is non-empty.
pub fn deliver_if_matches(
    report: &dyn ReportPort,
    results: &ResultSet,
    generated_at: NaiveDateTime,
) -> Result<bool, ScreenerError> {
    if results.is_empty() {
        return Ok(false);
    }
    report.deliver(results, generated_at)?;
    Ok(true)
}

fn print_summary(results: &ResultSet) {
    eprintln!("\n=== Screening Results ===");
    for (category, records) in results.iter() {
        eprintln!("{:<20} {}", format!("{}:", category), records.len());
        for record in records {
            eprintln!("  {}  {}", record.code, record.name);
        }
    }
}

pub fn resolve_data_settings(
    adapter: &dyn ConfigPort,
    overrides: &Overrides,
) -> Result<DataSettings, ScreenerError> {
    let required = |key: &str, over: &Option<PathBuf>| -> Result<PathBuf, ScreenerError> {
        match over {
            Some(path) => Ok(path.clone()),
            None => adapter
                .get_string("data", key)
                .map(PathBuf::from)
                .ok_or_else(|| ScreenerError::ConfigMissing {
                    section: "data".into(),
                    key: key.into(),
                }),
        }
    };

    Ok(DataSettings {
        symbols_path: required("symbols_path", &overrides.symbols)?,
        data_dir: required("data_dir", &overrides.data_dir)?,
        suffix: adapter
            .get_string("data", "symbol_suffix")
            .unwrap_or_else(|| DEFAULT_SUFFIX.to_string()),
        output_path: overrides
            .output
            .clone()
            .or_else(|| adapter.get_string("report", "output_path").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
    })
}

/// Validate then build the screening parameters; missing keys take defaults.
pub fn build_screening_config(adapter: &dyn ConfigPort) -> Result<ScreeningConfig, ScreenerError> {
    validate_screening_config(adapter)?;

    let d = ScreeningConfig::default();
    let i = d.indicators;
    let int =
        |section: &str, key: &str, default: usize| adapter.get_usize(section, key, default);
    let double =
        |section: &str, key: &str, default: f64| adapter.get_double(section, key, default);
    let pairs = i.ma_spans.cross_pairs;

    Ok(ScreeningConfig {
        market_cap_floor: double("screening", "market_cap_floor", d.market_cap_floor),
        min_sessions: int("screening", "min_sessions", d.min_sessions),
        recent_sessions: int("screening", "recent_sessions", d.recent_sessions),
        workers: int("screening", "workers", d.workers),
        indicators: IndicatorParams {
            volume_ratio_windows: VolumeWindows {
                short: int("indicators", "volume_short", i.volume_ratio_windows.short),
                long: int("indicators", "volume_long", i.volume_ratio_windows.long),
            },
            rsi_period: int("indicators", "rsi_period", i.rsi_period),
            macd_spans: MacdSpans {
                fast: int("indicators", "macd_fast", i.macd_spans.fast),
                slow: int("indicators", "macd_slow", i.macd_spans.slow),
                signal: int("indicators", "macd_signal", i.macd_spans.signal),
            },
            ma_spans: MaSpans {
                deviation_long: int("indicators", "ma_long", i.ma_spans.deviation_long),
                deviation_short: int("indicators", "ma_short", i.ma_spans.deviation_short),
                cross_pairs: [
                    (
                        int("indicators", "golden_short_1", pairs[0].0),
                        int("indicators", "golden_long_1", pairs[0].1),
                    ),
                    (
                        int("indicators", "golden_short_2", pairs[1].0),
                        int("indicators", "golden_long_2", pairs[1].1),
                    ),
                ],
            },
            long_decline_window: LongDeclineWindow {
                years: u32::try_from(int(
                    "screening",
                    "long_decline_years",
                    i.long_decline_window.years as usize,
                ))
                .unwrap_or(i.long_decline_window.years),
                min_sessions: int(
                    "screening",
                    "long_decline_min_sessions",
                    i.long_decline_window.min_sessions,
                ),
            },
        },
        contrarian: ContrarianRule {
            long_decline_min_pct: double(
                "contrarian",
                "long_decline_min_pct",
                d.contrarian.long_decline_min_pct,
            ),
            volume_ratio_min: double(
                "contrarian",
                "volume_ratio_min",
                d.contrarian.volume_ratio_min,
            ),
        },
        trend: TrendRule {
            growth_floor: double("trend", "growth_floor", d.trend.growth_floor),
            rsi_band: Band::new(
                double("trend", "rsi_low", d.trend.rsi_band.low),
                double("trend", "rsi_high", d.trend.rsi_band.high),
            ),
            volume_ratio_min: double("trend", "volume_ratio_min", d.trend.volume_ratio_min),
        },
        buzz: BuzzRule {
            price_band: Band::new(
                double("buzz", "price_min", d.buzz.price_band.low),
                double("buzz", "price_max", d.buzz.price_band.high),
            ),
            volume_ratio_min: double("buzz", "volume_ratio_min", d.buzz.volume_ratio_min),
            prev_change_min_pct: double(
                "buzz",
                "prev_change_min_pct",
                d.buzz.prev_change_min_pct,
            ),
        },
    })
}

fn run_inspect(config_path: &PathBuf, symbol: &str, data_dir: Option<PathBuf>) -> ExitCode {
    match inspect(config_path, symbol, data_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}

fn inspect(
    config_path: &PathBuf,
    symbol: &str,
    data_dir: Option<PathBuf>,
) -> Result<(), ScreenerError> {
    let adapter = load_config(config_path)?;
    let config = build_screening_config(&adapter)?;
    let data_dir = match data_dir {
        Some(dir) => dir,
        None => adapter
            .get_string("data", "data_dir")
            .map(PathBuf::from)
            .ok_or_else(|| ScreenerError::ConfigMissing {
                section: "data".into(),
                key: "data_dir".into(),
            })?,
    };
    let suffix = adapter
        .get_string("data", "symbol_suffix")
        .unwrap_or_else(|| DEFAULT_SUFFIX.to_string());
    let data = CsvMarketData::open(data_dir)?;

    let outcome = screening::evaluate_symbol(&data, symbol, &config);
    match &outcome {
        SymbolOutcome::Skipped { reason, .. } => {
            println!("{symbol}: skipped ({reason})");
        }
        SymbolOutcome::Evaluated(e) => {
            let f = &e.fundamentals;
            let b = &e.bundle;
            println!("{} {}", display_code(symbol, &suffix), f.name);
            println!("  Market cap:        {:.1} (100M)", f.market_cap / 1e8);
            println!("  Price:             {:.0}", f.price);
            println!("  Growth forecast:   {:.1}%", f.earnings_growth * 100.0);
            println!("  Volume ratio:      {:.2}", b.volume_ratio);
            println!("  Prev change:       {:.1}%", b.prev_change_pct);
            println!("  MA deviation long: {:.1}%", b.ma_deviation_long_pct);
            println!("  MA deviation short:{:.1}%", b.ma_deviation_short_pct);
            println!("  Long-window change:{:.1}%", b.long_decline_pct);
            println!("  RSI:               {:.1}", b.rsi);
            println!("  MACD bullish:      {}", b.macd_bullish);
            println!("  Golden cross:      {}", b.golden_cross);

            let matched: Vec<Category> = screening::records_for(&outcome, &suffix, &config)
                .iter()
                .map(|r| r.category())
                .collect();
            if matched.is_empty() {
                println!("  Categories:        none");
            } else {
                let labels: Vec<&str> = matched.iter().map(|c| c.label()).collect();
                println!("  Categories:        {}", labels.join(", "));
            }
        }
    }
    Ok(())
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(e) => return fail(e),
    };
    match build_screening_config(&adapter) {
        Ok(config) => {
            eprintln!("Configuration is valid");
            eprintln!("  Market cap floor:  {}", config.market_cap_floor);
            eprintln!("  Recent sessions:   {}", config.recent_sessions);
            eprintln!("  Workers:           {}", config.workers);
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}
