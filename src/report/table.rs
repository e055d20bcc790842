//! Console table output for the reviewer matrix.
//!
//! Thin wrappers that hand the matrix to the console_format module.

use crate::console_format::{self, SummaryWidths, TableWriter};
use crate::matrix::ReviewerMatrix;
use std::io::{self, IsTerminal};

/// Print the ranked summary table to stdout, sized to the terminal.
pub fn print_summary_table(matrix: &ReviewerMatrix, repos: &[String]) -> io::Result<()> {
    let widths = SummaryWidths::calculate(matrix, console_format::get_terminal_width());
    let stdout = io::stdout();
    let use_colors = stdout.is_terminal();
    let mut writer = TableWriter::new(stdout.lock(), use_colors);
    writer.write_summary_table(matrix, repos, &widths)
}
