//! Report generation module - rendering the finished matrix.
//!
//! This module handles:
//! - Writing the styled spreadsheet
//! - Export to JSON
//! - The console summary table
//!
//! None of these touch the aggregation; they take a `ReviewerMatrix` as
//! pure input.
//!
//! # Module Organization
//!
//! - `xlsx` - Spreadsheet layout, styling and hyperlinks
//! - `export` - JSON export
//! - `table` - Console summary output

mod export;
mod table;
mod xlsx;

// Re-export spreadsheet functions
pub use xlsx::write_xlsx_report;

// Re-export export functions
pub use export::export_json_report;

// Re-export table functions
pub use table::print_summary_table;
