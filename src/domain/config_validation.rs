//! Configuration validation.
//!
//! Validates screening parameters before a run. Missing keys fall back to
//! the defaults in [`ScreeningConfig::default`] and are always valid.

use crate::domain::config::ScreeningConfig;
use crate::domain::error::ScreenerError;
use crate::ports::config_port::ConfigPort;

/// Longest lookback accepted for the long-window decline.
pub const MAX_LONG_DECLINE_YEARS: i64 = 50;

/// Integer keys that must be at least 1, with their defaults.
fn period_keys() -> Vec<(&'static str, &'static str, i64)> {
    let d = ScreeningConfig::default();
    let i = d.indicators;
    let pairs = i.ma_spans.cross_pairs;
    vec![
        ("screening", "min_sessions", d.min_sessions as i64),
        ("screening", "recent_sessions", d.recent_sessions as i64),
        ("screening", "workers", d.workers as i64),
        ("screening", "long_decline_years", i.long_decline_window.years as i64),
        ("screening", "long_decline_min_sessions", i.long_decline_window.min_sessions as i64),
        ("indicators", "volume_short", i.volume_ratio_windows.short as i64),
        ("indicators", "volume_long", i.volume_ratio_windows.long as i64),
        ("indicators", "rsi_period", i.rsi_period as i64),
        ("indicators", "macd_fast", i.macd_spans.fast as i64),
        ("indicators", "macd_slow", i.macd_spans.slow as i64),
        ("indicators", "macd_signal", i.macd_spans.signal as i64),
        ("indicators", "ma_long", i.ma_spans.deviation_long as i64),
        ("indicators", "ma_short", i.ma_spans.deviation_short as i64),
        ("indicators", "golden_short_1", pairs[0].0 as i64),
        ("indicators", "golden_long_1", pairs[0].1 as i64),
        ("indicators", "golden_short_2", pairs[1].0 as i64),
        ("indicators", "golden_long_2", pairs[1].1 as i64),
    ]
}

pub fn validate_screening_config(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    validate_periods(config)?;
    validate_long_decline_years(config)?;
    validate_window_order(config)?;
    validate_market_cap_floor(config)?;
    validate_volume_thresholds(config)?;
    validate_rsi_band(config)?;
    validate_price_band(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> ScreenerError {
    ScreenerError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_periods(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    for (section, key, default) in period_keys() {
        if config.get_int(section, key, default) < 1 {
            return Err(invalid(section, key, &format!("{key} must be at least 1")));
        }
    }
    Ok(())
}

fn validate_long_decline_years(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    let default = ScreeningConfig::default().indicators.long_decline_window.years;
    let years = config.get_int("screening", "long_decline_years", default as i64);
    if years > MAX_LONG_DECLINE_YEARS {
        return Err(invalid(
            "screening",
            "long_decline_years",
            &format!("long_decline_years must not exceed {MAX_LONG_DECLINE_YEARS}"),
        ));
    }
    Ok(())
}

fn validate_window_order(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    let d = ScreeningConfig::default();
    let i = d.indicators;

    let short = config.get_int("indicators", "volume_short", i.volume_ratio_windows.short as i64);
    let long = config.get_int("indicators", "volume_long", i.volume_ratio_windows.long as i64);
    if short > long {
        return Err(invalid(
            "indicators",
            "volume_short",
            "volume_short must not exceed volume_long",
        ));
    }

    let fast = config.get_int("indicators", "macd_fast", i.macd_spans.fast as i64);
    let slow = config.get_int("indicators", "macd_slow", i.macd_spans.slow as i64);
    if fast >= slow {
        return Err(invalid(
            "indicators",
            "macd_fast",
            "macd_fast must be shorter than macd_slow",
        ));
    }

    let min = config.get_int("screening", "min_sessions", d.min_sessions as i64);
    let recent = config.get_int("screening", "recent_sessions", d.recent_sessions as i64);
    if min > recent {
        return Err(invalid(
            "screening",
            "min_sessions",
            "min_sessions must not exceed recent_sessions",
        ));
    }
    Ok(())
}

fn validate_market_cap_floor(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    let value = config.get_double(
        "screening",
        "market_cap_floor",
        ScreeningConfig::default().market_cap_floor,
    );
    if value < 0.0 {
        return Err(invalid(
            "screening",
            "market_cap_floor",
            "market_cap_floor must be non-negative",
        ));
    }
    Ok(())
}

fn validate_volume_thresholds(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    let d = ScreeningConfig::default();
    for (section, default) in [
        ("contrarian", d.contrarian.volume_ratio_min),
        ("trend", d.trend.volume_ratio_min),
        ("buzz", d.buzz.volume_ratio_min),
    ] {
        if config.get_double(section, "volume_ratio_min", default) < 0.0 {
            return Err(invalid(
                section,
                "volume_ratio_min",
                "volume_ratio_min must be non-negative",
            ));
        }
    }
    Ok(())
}

fn validate_rsi_band(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    let band = ScreeningConfig::default().trend.rsi_band;
    let low = config.get_double("trend", "rsi_low", band.low);
    let high = config.get_double("trend", "rsi_high", band.high);
    if !(0.0..=100.0).contains(&low) || !(0.0..=100.0).contains(&high) {
        return Err(invalid("trend", "rsi_low", "RSI bounds must be within 0-100"));
    }
    if low >= high {
        return Err(invalid("trend", "rsi_low", "rsi_low must be below rsi_high"));
    }
    Ok(())
}

fn validate_price_band(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    let band = ScreeningConfig::default().buzz.price_band;
    let min = config.get_double("buzz", "price_min", band.low);
    let max = config.get_double("buzz", "price_max", band.high);
    if min < 0.0 {
        return Err(invalid("buzz", "price_min", "price_min must be non-negative"));
    }
    if min > max {
        return Err(invalid("buzz", "price_min", "price_min must not exceed price_max"));
    }
    Ok(())
}
