//! Styling-agnostic report document
//!
//! The builder turns category buckets into sheets of classified cells. Every
//! cell carries a [`CellClass`] derived from the record's structured fields,
//! so writers style by class and never inspect rendered text.

use crate::categorize::Bucket;
use crate::record::{FieldIssue, FieldKind, MetaField, PageRecord, PageStatus, RobotsField};

/// Header row, in column order
pub const COLUMN_HEADERS: [&str; 9] = [
    "Original URL",
    "Final URL",
    "Meta Title",
    "Meta Description",
    "H1",
    "Status Code",
    "Redirect Count",
    "Canonical URL",
    "Meta Robots Noindex",
];

/// Longest sheet name a workbook accepts
pub const MAX_SHEET_NAME_CHARS: usize = 31;

/// Characters a workbook forbids in sheet names
const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Longest text a workbook cell accepts
pub const MAX_CELL_CHARS: usize = 32_767;

/// Appended to cell text cut at [`MAX_CELL_CHARS`]
pub const TRUNCATION_SUFFIX: &str = "… [truncated]";

/// Name of the sheet emitted when no bucket holds a record
pub const EMPTY_REPORT_SHEET: &str = "No Data";

/// Text of the single cell on the empty-report sheet
pub const EMPTY_REPORT_NOTICE: &str = "No URLs were found in the sitemap.";

/// Semantic class of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellClass {
    Header,
    Link,
    PlainText,
    StatusValue,
    FetchError,
    ExtractionError,
    DuplicateWarning,
    Notice,
}

/// Visual weight a writer gives to a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Header,
    Error,
    Warning,
    Normal,
    Link,
}

impl CellClass {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Header => Severity::Header,
            Self::Link => Severity::Link,
            Self::FetchError | Self::ExtractionError => Severity::Error,
            Self::DuplicateWarning => Severity::Warning,
            Self::PlainText | Self::StatusValue | Self::Notice => Severity::Normal,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub class: CellClass,
}

impl Cell {
    /// Text cell, cut to [`MAX_CELL_CHARS`] with a visible suffix when longer
    pub fn text(value: impl Into<String>, class: CellClass) -> Self {
        Self {
            value: CellValue::Text(cap_cell_text(value.into())),
            class,
        }
    }

    pub fn number(value: u32, class: CellClass) -> Self {
        Self {
            value: CellValue::Number(value),
            class,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    /// Header row first when the sheet holds records
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Number of rows after the header row
    pub fn record_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report {
    pub sheets: Vec<Sheet>,
}

impl Report {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }
}

/// Builds the report from buckets in presentation order
///
/// Each non-empty bucket becomes one sheet: a header row, then one row per
/// record in bucket order. When every bucket is empty the report holds a
/// single informational sheet instead.
pub fn build_report(buckets: &[Bucket<'_>]) -> Report {
    let mut sheets: Vec<Sheet> = Vec::new();

    for bucket in buckets.iter().filter(|bucket| !bucket.is_empty()) {
        let name = unique_sheet_name(&bucket.name, &sheets);

        let mut rows = Vec::with_capacity(bucket.len() + 1);
        rows.push(header_row());
        rows.extend(bucket.records.iter().map(|record| record_row(record)));

        sheets.push(Sheet { name, rows });
    }

    if sheets.is_empty() {
        sheets.push(Sheet {
            name: EMPTY_REPORT_SHEET.to_string(),
            rows: vec![Row {
                cells: vec![Cell::text(EMPTY_REPORT_NOTICE, CellClass::Notice)],
            }],
        });
    }

    Report { sheets }
}

/// Replaces forbidden characters and truncates to the workbook's limit
///
/// # Examples
///
/// ```
/// use sitemap_audit::output::sanitize_sheet_name;
///
/// assert_eq!(sanitize_sheet_name("Q&A / Help"), "Q&A _ Help");
/// assert_eq!(sanitize_sheet_name("A very long category name that overflows").chars().count(), 31);
/// ```
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if FORBIDDEN_SHEET_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'');

    if cleaned.is_empty() {
        return "Sheet".to_string();
    }
    cleaned.chars().take(MAX_SHEET_NAME_CHARS).collect()
}

/// Sanitized name that does not collide (case-insensitively) with earlier sheets
fn unique_sheet_name(name: &str, existing: &[Sheet]) -> String {
    let base = sanitize_sheet_name(name);
    let taken = |candidate: &str| {
        existing
            .iter()
            .any(|sheet| sheet.name.eq_ignore_ascii_case(candidate))
    };

    if !taken(&base) {
        return base;
    }

    let mut n = 2;
    loop {
        let suffix = format!(" ({})", n);
        let keep = MAX_SHEET_NAME_CHARS - suffix.chars().count();
        let candidate = format!("{}{}", base.chars().take(keep).collect::<String>(), suffix);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn cap_cell_text(text: String) -> String {
    if text.chars().count() <= MAX_CELL_CHARS {
        return text;
    }

    let keep = MAX_CELL_CHARS - TRUNCATION_SUFFIX.chars().count();
    let mut capped: String = text.chars().take(keep).collect();
    capped.push_str(TRUNCATION_SUFFIX);
    capped
}

fn header_row() -> Row {
    Row {
        cells: COLUMN_HEADERS
            .iter()
            .map(|header| Cell::text(*header, CellClass::Header))
            .collect(),
    }
}

fn record_row(record: &PageRecord) -> Row {
    let meta = &record.metadata;

    Row {
        cells: vec![
            Cell::text(record.original_url.as_str(), CellClass::Link),
            Cell::text(record.final_url.as_str(), CellClass::Link),
            meta_cell(&meta.title, FieldKind::Title, CellClass::PlainText),
            meta_cell(&meta.description, FieldKind::Description, CellClass::PlainText),
            meta_cell(&meta.h1, FieldKind::H1, CellClass::PlainText),
            status_cell(record.status),
            Cell::number(record.redirect_count, CellClass::PlainText),
            meta_cell(&meta.canonical, FieldKind::Canonical, CellClass::Link),
            robots_cell(&meta.robots),
        ],
    }
}

fn meta_cell(field: &MetaField, kind: FieldKind, plain: CellClass) -> Cell {
    let class = match field.issue() {
        Some(FieldIssue::ExtractionError) => CellClass::ExtractionError,
        Some(FieldIssue::Duplicate { .. }) => CellClass::DuplicateWarning,
        None if field.is_empty() => CellClass::PlainText,
        None => plain,
    };
    Cell::text(field.render(kind), class)
}

fn status_cell(status: PageStatus) -> Cell {
    match status {
        PageStatus::Code(code) => Cell::number(u32::from(code), CellClass::StatusValue),
        PageStatus::Error => Cell::text(status.to_string(), CellClass::FetchError),
    }
}

fn robots_cell(robots: &RobotsField) -> Cell {
    let class = match robots {
        RobotsField::FetchFailed => CellClass::FetchError,
        _ => match robots.issue() {
            Some(FieldIssue::ExtractionError) => CellClass::ExtractionError,
            Some(FieldIssue::Duplicate { .. }) => CellClass::DuplicateWarning,
            None => CellClass::PlainText,
        },
    };
    Cell::text(robots.render(), class)
}
