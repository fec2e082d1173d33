//! Report delivery port.

use chrono::NaiveDateTime;

use crate::domain::error::ScreenerError;
use crate::domain::strategy::ResultSet;

/// Port for rendering and delivering a screening run's matches.
pub trait ReportPort {
    fn deliver(&self, results: &ResultSet, generated_at: NaiveDateTime)
    -> Result<(), ScreenerError>;
}
