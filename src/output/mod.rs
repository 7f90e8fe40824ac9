//! Output module for building and exporting audit reports
//!
//! This module handles:
//! - Building the per-category report document from page records
//! - Rendering reports to Excel workbooks
//! - Computing and printing aggregate statistics
//! - Generating markdown summaries of audit results

mod markdown;
mod report;
pub mod stats;
mod traits;
mod xlsx;

pub use markdown::{format_markdown_summary, write_markdown_summary};
pub use report::{
    build_report, sanitize_sheet_name, Cell, CellClass, CellValue, Report, Row, Severity, Sheet,
    COLUMN_HEADERS, EMPTY_REPORT_NOTICE, EMPTY_REPORT_SHEET, MAX_CELL_CHARS,
    MAX_SHEET_NAME_CHARS, TRUNCATION_SUFFIX,
};
pub use stats::{print_statistics, summarize, AuditStats};
pub use traits::{AuditSummary, OutputError, OutputResult, ReportWriter};
pub use xlsx::{XlsxReportWriter, XLSX_CONTENT_TYPE};
