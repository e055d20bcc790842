//! JSON export of the reviewer matrix.
//!
//! Mirrors the spreadsheet content in a machine-readable form, for feeding
//! dashboards or diffing between runs.

use crate::matrix::{MatrixRow, ReviewerMatrix};
use crate::types::format_timestamp;
use serde_json::{Map, Value, json};
use std::fs::File;
use std::path::Path;

/// Build the JSON document for a matrix.
///
/// # Arguments
/// * `matrix` - The ranked matrix
/// * `repos` - Repositories the matrix was built from
/// * `web_base` - Site base URL for request links
/// * `generated_at` - Timestamp recorded in the document
pub fn matrix_to_json(
    matrix: &ReviewerMatrix,
    repos: &[String],
    web_base: &str,
    generated_at: chrono::DateTime<chrono::Utc>,
) -> Value {
    let rows: Vec<Value> = matrix.rows.iter().map(|row| row_to_json(matrix, row, web_base)).collect();

    json!({
        "generated_at": format_timestamp(&generated_at),
        "repositories": repos,
        "columns": matrix.header(),
        "rows": rows,
    })
}

fn row_to_json(matrix: &ReviewerMatrix, row: &MatrixRow, web_base: &str) -> Value {
    let counts: Map<String, Value> =
        row.counts.iter().map(|(status, n)| (status.glyph().to_string(), json!(n))).collect();

    let reviewers: Map<String, Value> = matrix
        .reviewers
        .iter()
        .zip(&row.cells)
        .filter_map(|(login, cell)| cell.map(|status| (login.clone(), json!(status.glyph()))))
        .collect();

    json!({
        "request": row.id.to_string(),
        "url": row.id.web_url(web_base),
        "title": row.title,
        "updated_at": format_timestamp(&row.updated_at),
        "total": row.total,
        "counts": counts,
        "reviewers": reviewers,
    })
}

/// Export the matrix as pretty-printed JSON.
pub fn export_json_report(matrix: &ReviewerMatrix, repos: &[String], web_base: &str, output_path: &Path) -> Result<(), String> {
    let report = matrix_to_json(matrix, repos, web_base, chrono::Utc::now());

    let file = File::create(output_path).map_err(|e| format!("Failed to create {}: {}", output_path.display(), e))?;
    serde_json::to_writer_pretty(file, &report).map_err(|e| format!("Failed to write {}: {}", output_path.display(), e))?;

    Ok(())
}
