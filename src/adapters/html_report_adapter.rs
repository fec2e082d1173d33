//! HTML report adapter implementing ReportPort.
//!
//! Renders one table per non-empty category under a timestamped heading and
//! writes the page to disk. The page is the body of the daily notification;
//! its `<title>` carries the subject line.

use std::fs;
use std::path::PathBuf;

use askama::Template;
use chrono::NaiveDateTime;

use crate::domain::error::ScreenerError;
use crate::domain::strategy::{MatchRecord, ResultSet};
use crate::ports::report_port::ReportPort;

struct CategorySection {
    label: &'static str,
    headers: &'static [&'static str],
    rows: Vec<Vec<String>>,
}

#[derive(Template)]
#[template(path = "screening_report.html")]
struct ScreeningReportTemplate {
    subject: String,
    generated: String,
    sections: Vec<CategorySection>,
}

pub struct HtmlReportAdapter {
    output_path: PathBuf,
}

impl HtmlReportAdapter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }
}

impl ReportPort for HtmlReportAdapter {
    fn deliver(
        &self,
        results: &ResultSet,
        generated_at: NaiveDateTime,
    ) -> Result<(), ScreenerError> {
        let html = render_html(results, generated_at)?;

        let write_error = |e: std::io::Error| ScreenerError::Report {
            reason: format!("failed to write {}: {}", self.output_path.display(), e),
        };
        if let Some(parent) = self.output_path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(&self.output_path, html).map_err(write_error)?;

        tracing::info!(path = %self.output_path.display(), "report written");
        Ok(())
    }
}

pub fn subject_line(generated_at: NaiveDateTime) -> String {
    format!(
        "[Stock screening] Matches found - {}",
        generated_at.format("%m/%d")
    )
}

pub fn render_html(
    results: &ResultSet,
    generated_at: NaiveDateTime,
) -> Result<String, ScreenerError> {
    let sections = results
        .iter()
        .filter(|(_, records)| !records.is_empty())
        .map(|(category, records)| CategorySection {
            label: category.label(),
            headers: MatchRecord::headers(category),
            rows: records.iter().map(MatchRecord::cells).collect(),
        })
        .collect();

    let template = ScreeningReportTemplate {
        subject: subject_line(generated_at),
        generated: generated_at.format("%Y-%m-%d %H:%M").to_string(),
        sections,
    };

    template.render().map_err(|e| ScreenerError::Report {
        reason: format!("template render failed: {}", e),
    })
}
