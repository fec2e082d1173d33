//! Technical indicators over a daily close/volume series.
//!
//! Every function looks only at the trailing window ending at the last
//! observation. Short input never fails: each indicator falls back to a
//! neutral value (0, 50 for RSI, or `false`).

pub mod bundle;
pub mod ema;
pub mod macd;
pub mod momentum;
pub mod moving_average;
pub mod rsi;
pub mod volume;

pub use bundle::IndicatorBundle;
pub use ema::ema_series;
pub use macd::{macd_bullish, macd_last, MacdPoint};
pub use momentum::{decline_over_window, previous_change};
pub use moving_average::{golden_cross, ma_deviation, sma};
pub use rsi::rsi;
pub use volume::volume_ratio;
