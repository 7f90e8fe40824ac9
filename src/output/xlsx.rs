//! Excel workbook writer
//!
//! Renders a [`Report`] to `.xlsx` bytes. Styling is keyed only on the
//! [`Severity`] of each cell.

use crate::output::report::{CellValue, Report, Severity, Sheet, COLUMN_HEADERS};
use crate::output::traits::{OutputResult, ReportWriter};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatUnderline, Workbook, Worksheet};

/// MIME type of an Office Open XML workbook
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Column widths in character units, in column order
const COLUMN_WIDTHS: [f64; COLUMN_HEADERS.len()] =
    [40.0, 40.0, 50.0, 60.0, 40.0, 12.0, 14.0, 40.0, 22.0];

/// Width of the single column on a notice sheet
const NOTICE_WIDTH: f64 = 60.0;

const HEADER_FILL: u32 = 0x366092;
const ERROR_FILL: u32 = 0xF8CBAD;
const ERROR_FONT: u32 = 0x9C0006;
const WARNING_FILL: u32 = 0xFFEB9C;
const WARNING_FONT: u32 = 0x9C5700;
const LINK_FONT: u32 = 0x0563C1;

/// Cell formats, one per severity
struct Styles {
    header: Format,
    error: Format,
    warning: Format,
    normal: Format,
    link: Format,
}

impl Styles {
    fn new() -> Self {
        let base = Format::new().set_text_wrap().set_align(FormatAlign::Top);

        Self {
            header: Format::new()
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(Color::RGB(HEADER_FILL))
                .set_align(FormatAlign::Center),
            error: base
                .clone()
                .set_font_color(Color::RGB(ERROR_FONT))
                .set_background_color(Color::RGB(ERROR_FILL)),
            warning: base
                .clone()
                .set_font_color(Color::RGB(WARNING_FONT))
                .set_background_color(Color::RGB(WARNING_FILL)),
            link: base
                .clone()
                .set_font_color(Color::RGB(LINK_FONT))
                .set_underline(FormatUnderline::Single),
            normal: base,
        }
    }

    fn for_severity(&self, severity: Severity) -> &Format {
        match severity {
            Severity::Header => &self.header,
            Severity::Error => &self.error,
            Severity::Warning => &self.warning,
            Severity::Normal => &self.normal,
            Severity::Link => &self.link,
        }
    }
}

/// Writes reports as Excel workbooks
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxReportWriter;

impl XlsxReportWriter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportWriter for XlsxReportWriter {
    fn content_type(&self) -> &'static str {
        XLSX_CONTENT_TYPE
    }

    fn file_extension(&self) -> &'static str {
        "xlsx"
    }

    fn render(&self, report: &Report) -> OutputResult<Vec<u8>> {
        let styles = Styles::new();
        let mut workbook = Workbook::new();

        for sheet in &report.sheets {
            let worksheet = workbook.add_worksheet();
            write_sheet(worksheet, sheet, &styles)?;
        }

        let bytes = workbook.save_to_buffer()?;
        tracing::debug!(
            "Rendered workbook with {} sheets ({} bytes)",
            report.sheets.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet, styles: &Styles) -> OutputResult<()> {
    worksheet.set_name(sheet.name.as_str())?;

    for (row_index, row) in sheet.rows.iter().enumerate() {
        let row_num = row_index as u32;
        for (col_index, cell) in row.cells.iter().enumerate() {
            let col_num = col_index as u16;
            let format = styles.for_severity(cell.class.severity());
            match &cell.value {
                CellValue::Text(text) => {
                    worksheet.write_string_with_format(row_num, col_num, text.as_str(), format)?;
                }
                CellValue::Number(number) => {
                    worksheet.write_number_with_format(row_num, col_num, *number, format)?;
                }
            }
        }
    }

    let is_record_sheet = sheet
        .rows
        .first()
        .is_some_and(|row| row.cells.len() == COLUMN_HEADERS.len());

    if is_record_sheet {
        for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }
        worksheet.set_freeze_panes(1, 0)?;
    } else {
        worksheet.set_column_width(0, NOTICE_WIDTH)?;
    }

    Ok(())
}
