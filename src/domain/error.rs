//! Domain error types.

/// Top-level error type for kabuscreen.
#[derive(Debug, thiserror::Error)]
pub enum ScreenerError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("malformed data for {symbol}: {reason}")]
    DataFormat { symbol: String, reason: String },

    #[error("symbol list error in {file}: {reason}")]
    SymbolList { file: String, reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&ScreenerError> for std::process::ExitCode {
    fn from(err: &ScreenerError) -> Self {
        let code: u8 = match err {
            ScreenerError::Io(_) => 1,
            ScreenerError::ConfigParse { .. }
            | ScreenerError::ConfigMissing { .. }
            | ScreenerError::ConfigInvalid { .. } => 2,
            ScreenerError::NoData { .. }
            | ScreenerError::DataFormat { .. }
            | ScreenerError::SymbolList { .. } => 3,
            ScreenerError::Report { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
