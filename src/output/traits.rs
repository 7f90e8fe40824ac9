//! Report writer trait and types
//!
//! This module defines the trait interface for report writers and the
//! summary data shared by the text exporters.

use crate::output::report::Report;
use crate::output::stats::AuditStats;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Renders a [`Report`] into a downloadable document
pub trait ReportWriter: Send + Sync {
    /// MIME type of the rendered document
    fn content_type(&self) -> &'static str;

    /// File extension without the leading dot
    fn file_extension(&self) -> &'static str;

    /// Renders the whole report to bytes
    fn render(&self, report: &Report) -> OutputResult<Vec<u8>>;
}

/// Summary of one audit run
#[derive(Debug, Clone, Default)]
pub struct AuditSummary {
    pub sitemap_url: String,
    /// Local time the report was generated, RFC 3339
    pub generated_at: String,
    pub report_filename: String,
    pub duration_seconds: f64,
    pub total_urls: usize,

    /// Non-empty categories in presentation order
    pub category_counts: Vec<(String, usize)>,

    pub stats: AuditStats,
}

impl AuditSummary {
    /// Share of records that carry no error and no duplicate marker, in percent
    pub fn healthy_rate(&self) -> f64 {
        if self.stats.processed == 0 {
            return 0.0;
        }
        (self.stats.healthy as f64 / self.stats.processed as f64) * 100.0
    }

    /// Share of records whose fetch failed, in percent
    pub fn error_rate(&self) -> f64 {
        if self.stats.processed == 0 {
            return 0.0;
        }
        (self.stats.errors as f64 / self.stats.processed as f64) * 100.0
    }
}
