//! Spreadsheet rendering of the reviewer matrix.
//!
//! A single pass over a finished `ReviewerMatrix`: header row, cell values,
//! hyperlinks, column widths and frozen panes. No aggregation happens here.

use crate::matrix::{CellValue, ColumnKind, MatrixRow, ReviewerMatrix};
use rust_xlsxwriter::{Color, Format, FormatAlign, Url, Workbook, XlsxError};
use std::path::Path;

pub const SHEET_NAME: &str = "Sheet1";

const REVIEWER_COLUMN_WIDTH: f64 = 2.6;
const TITLE_COLUMN_WIDTH: f64 = 40.0;
const HEADER_ROTATION: i16 = 45;
const LINK_COLOR: u32 = 0x0000FF;

/// Rows and columns kept in view while scrolling: header row, request and title
pub const FROZEN_ROWS: u32 = 1;
pub const FROZEN_COLUMNS: u16 = 2;

/// How a header cell is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    /// Rotated 45°, centered, bottom-anchored
    Rotated,
    /// Bottom-anchored
    Bottom,
}

/// Styling decisions for one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnLayout {
    pub header: HeaderStyle,
    /// Fixed width, or None for the spreadsheet default
    pub width: Option<f64>,
}

/// Decide header style and width for a column
pub fn column_layout(kind: &ColumnKind) -> ColumnLayout {
    match kind {
        ColumnKind::Reviewer(_) => ColumnLayout { header: HeaderStyle::Rotated, width: Some(REVIEWER_COLUMN_WIDTH) },
        ColumnKind::Title => ColumnLayout { header: HeaderStyle::Bottom, width: Some(TITLE_COLUMN_WIDTH) },
        _ => ColumnLayout { header: HeaderStyle::Bottom, width: None },
    }
}

/// What goes into one data cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellWrite {
    Skip,
    /// Hyperlink to `url` showing `text`, drawn with the link format
    Link { url: String, text: String },
    Text(String),
    Number(f64),
}

/// Decide how a data cell is written. Only request identifiers become links.
pub fn cell_write(kind: &ColumnKind, value: CellValue, row: &MatrixRow, web_base: &str) -> CellWrite {
    match (kind, value) {
        (_, CellValue::Empty) => CellWrite::Skip,
        (ColumnKind::Request, CellValue::Text(text)) => CellWrite::Link { url: row.id.web_url(web_base), text },
        (_, CellValue::Text(text)) => CellWrite::Text(text),
        (_, CellValue::Count(n)) => CellWrite::Number(n as f64),
    }
}

/// Write the matrix to an .xlsx file.
///
/// The workbook is assembled in memory and saved in one step, so a failure
/// leaves no partial file behind.
pub fn write_xlsx_report(matrix: &ReviewerMatrix, web_base: &str, output_path: &Path) -> Result<(), String> {
    let mut workbook =
        build_workbook(matrix, web_base).map_err(|e| format!("Failed to build spreadsheet: {}", e))?;

    workbook
        .save(output_path)
        .map_err(|e| format!("Failed to write spreadsheet {}: {}", output_path.display(), e))
}

fn build_workbook(matrix: &ReviewerMatrix, web_base: &str) -> Result<Workbook, XlsxError> {
    let rotated = Format::new()
        .set_rotation(HEADER_ROTATION)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::Bottom);
    let bottom = Format::new().set_align(FormatAlign::Bottom);
    let link = Format::new().set_align(FormatAlign::Right).set_font_color(Color::RGB(LINK_COLOR));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let columns = matrix.columns();

    for (col, kind) in columns.iter().enumerate() {
        let col = col as u16;
        let layout = column_layout(kind);
        let format = match layout.header {
            HeaderStyle::Rotated => &rotated,
            HeaderStyle::Bottom => &bottom,
        };
        worksheet.write_string_with_format(0, col, kind.header(), format)?;
        if let Some(width) = layout.width {
            worksheet.set_column_width(col, width)?;
        }
    }

    for (i, row) in matrix.rows.iter().enumerate() {
        let r = i as u32 + 1;

        for (col, (kind, value)) in columns.iter().zip(matrix.row_values(row)).enumerate() {
            let col = col as u16;
            match cell_write(kind, value, row, web_base) {
                CellWrite::Skip => {}
                CellWrite::Link { url, text } => {
                    worksheet.write_url_with_format(r, col, Url::new(url).set_text(text), &link)?;
                }
                CellWrite::Text(text) => {
                    worksheet.write_string(r, col, text)?;
                }
                CellWrite::Number(n) => {
                    worksheet.write_number(r, col, n)?;
                }
            }
        }
    }

    worksheet.set_freeze_panes(FROZEN_ROWS, FROZEN_COLUMNS)?;

    Ok(workbook)
}
