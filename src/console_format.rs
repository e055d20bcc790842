/// Console formatting module - Pure rendering concerns
///
/// This module handles the terminal summary printed after a run:
/// - Table layout and borders
/// - Color terminal output
/// - Text truncation and padding
///
/// It writes to any `std::io::Write` destination, so the same code renders
/// to stdout (with colors) or to a string buffer in tests.
use crate::matrix::{MatrixRow, ReviewerMatrix, TOTAL_HEADER};
use crate::types::ReviewStatus;
use std::io::{self, Write};
use term::color::Color;
use terminal_size::{Width, terminal_size};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Narrowest title column worth printing
const MIN_TITLE_WIDTH: usize = 10;

/// Column widths for the summary table (content width, without padding)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryWidths {
    pub approvals: usize,
    pub total: usize,
    pub request: usize,
    pub title: usize,
}

impl SummaryWidths {
    /// Fit the table into `console_width` columns
    pub fn calculate(matrix: &ReviewerMatrix, console_width: usize) -> Self {
        let request = matrix.rows.iter().map(|r| display_width(&r.id.to_string())).max().unwrap_or(0).max(7);
        let approvals = 3;
        let total = 3;
        // "│ " + " │ " * 3 + " │" = 13 characters of borders and padding
        let used = approvals + total + request + 13;
        let title = console_width.saturating_sub(used).max(MIN_TITLE_WIDTH);
        SummaryWidths { approvals, total, request, title }
    }
}

/// Writer for table output - configurable for color/plain text
pub struct TableWriter<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> TableWriter<W> {
    /// Create a new table writer
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    /// Write formatted text, optionally wrapped in ANSI color codes
    fn write_colored(&mut self, text: &str, color: Option<Color>) -> io::Result<()> {
        match color {
            Some(color) if self.use_colors => write!(self.writer, "{}{}{}", ansi_foreground(color), text, ANSI_RESET),
            _ => write!(self.writer, "{}", text),
        }
    }

    /// Write the whole summary: header, one line per request, footer, totals
    pub fn write_summary_table(&mut self, matrix: &ReviewerMatrix, repos: &[String], widths: &SummaryWidths) -> io::Result<()> {
        writeln!(self.writer, "{}", border_line('┌', '┬', '┐', widths))?;
        let header = format_cells(
            [ReviewStatus::Approved.glyph(), TOTAL_HEADER, "request", "title"],
            widths,
        );
        writeln!(self.writer, "{}", header)?;
        writeln!(self.writer, "{}", border_line('├', '┼', '┤', widths))?;

        for row in &matrix.rows {
            let line = format_summary_row(row, widths);
            self.write_colored(&line, row_color(row))?;
            writeln!(self.writer)?;
        }

        writeln!(self.writer, "{}", border_line('└', '┴', '┘', widths))?;
        writeln!(self.writer, "{}", format_totals_line(matrix, repos))
    }
}

const ANSI_RESET: &str = "\x1b[0m";

/// Escape sequence selecting one of the 16 standard terminal colors
fn ansi_foreground(color: Color) -> String {
    if color < 8 { format!("\x1b[{}m", 30 + color) } else { format!("\x1b[{}m", 90 + (color - 8) % 8) }
}

/// Color a row by its most decisive state
fn row_color(row: &MatrixRow) -> Option<Color> {
    if row.count(ReviewStatus::RequestChanges) > 0 {
        Some(term::color::BRIGHT_RED)
    } else if row.approvals() > 0 {
        Some(term::color::BRIGHT_GREEN)
    } else {
        None
    }
}

/// Format one request's line
pub fn format_summary_row(row: &MatrixRow, widths: &SummaryWidths) -> String {
    let approvals = if row.approvals() == 0 { String::new() } else { row.approvals().to_string() };
    let total = if row.total == 0 { String::new() } else { row.total.to_string() };
    format_cells([&approvals, &total, &row.id.to_string(), &row.title], widths)
}

/// One-line totals shown under the table
pub fn format_totals_line(matrix: &ReviewerMatrix, repos: &[String]) -> String {
    let approved = matrix.rows.iter().filter(|r| r.approvals() > 0).count();
    format!(
        "{} open pull request(s) across {} repositor{}, {} with approvals, {} reviewer column(s)",
        matrix.rows.len(),
        repos.len(),
        if repos.len() == 1 { "y" } else { "ies" },
        approved,
        matrix.reviewers.len()
    )
}

fn format_cells(cells: [&str; 4], widths: &SummaryWidths) -> String {
    format!(
        "│ {} │ {} │ {} │ {} │",
        pad_left(cells[0], widths.approvals),
        pad_left(cells[1], widths.total),
        truncate_with_padding(cells[2], widths.request),
        truncate_with_padding(cells[3], widths.title)
    )
}

fn border_line(left: char, mid: char, right: char, widths: &SummaryWidths) -> String {
    let segments: Vec<String> =
        [widths.approvals, widths.total, widths.request, widths.title].iter().map(|w| "─".repeat(w + 2)).collect();
    let separator = mid.to_string();
    format!("{}{}{}", left, segments.join(separator.as_str()), right)
}

/// Get terminal width, falling back to 120 when not attached to one
pub fn get_terminal_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() { w as usize } else { 120 }
}

/// Calculate display width of a string (handles wide glyphs)
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Right-align a string within `width`
fn pad_left(s: &str, width: usize) -> String {
    let w = display_width(s);
    if w >= width { s.to_string() } else { format!("{}{}", " ".repeat(width - w), s) }
}

/// Truncate and pad string to exact width
pub fn truncate_with_padding(s: &str, width: usize) -> String {
    let display_w = display_width(s);

    if display_w <= width {
        return format!("{}{}", s, " ".repeat(width - display_w));
    }

    // Reserve space for "..."
    let target_width = if width >= 3 { width - 3 } else { width };
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let c_width = UnicodeWidthChar::width(c).unwrap_or(1);
        if current_width + c_width > target_width {
            break;
        }
        result.push(c);
        current_width += c_width;
    }

    if width >= 3 {
        result.push_str("...");
        current_width += 3;
    }

    if current_width < width {
        result.push_str(&" ".repeat(width - current_width));
    }

    result
}

#[cfg(test)]
#[path = "console_format_test.rs"]
mod console_format_test;
