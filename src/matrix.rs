/// Matrix builder - reshapes fetched pull requests into the reviewer grid
///
/// The pipeline is:
/// 1. Flatten every pull request into (request, reviewer, status) entries
/// 2. Resolve each (request, reviewer) pair to its highest-ranked status
/// 3. Keep only reviewers that are collaborators, alphabetically
/// 4. Count statuses per request and rank requests by approvals
use crate::types::{PullRequest, PullRequestId, ReviewStatus, format_timestamp};
use chrono::{DateTime, Utc};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Header of the total-count column
pub const TOTAL_HEADER: &str = "⅀";

/// One raw disposition before resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    pub request: PullRequestId,
    pub reviewer: String,
    pub status: ReviewStatus,
}

/// Flatten pull requests into review entries.
///
/// Sources: every submitted review, the author (as `Author`) and every
/// outstanding review request (as `Requested`).
pub fn collect_entries(prs: &[PullRequest]) -> Vec<ReviewEntry> {
    let mut entries = Vec::new();

    for pr in prs {
        for review in &pr.reviews {
            entries.push(ReviewEntry { request: pr.id.clone(), reviewer: review.reviewer.clone(), status: review.status });
        }

        entries.push(ReviewEntry { request: pr.id.clone(), reviewer: pr.author.clone(), status: ReviewStatus::Author });

        for login in &pr.requested_reviewers {
            entries.push(ReviewEntry { request: pr.id.clone(), reviewer: login.clone(), status: ReviewStatus::Requested });
        }
    }

    entries
}

/// Reduce entries to a single status per (request, reviewer), keeping the maximum.
pub fn resolve_statuses(entries: &[ReviewEntry]) -> BTreeMap<(PullRequestId, String), ReviewStatus> {
    let mut resolved: BTreeMap<(PullRequestId, String), ReviewStatus> = BTreeMap::new();

    for entry in entries {
        resolved
            .entry((entry.request.clone(), entry.reviewer.clone()))
            .and_modify(|status| *status = (*status).max(entry.status))
            .or_insert(entry.status);
    }

    resolved
}

/// A column of the final table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
    /// `owner/name#number`, links to the pull request
    Request,
    Title,
    UpdatedAt,
    /// ⅀ - number of non-empty reviewer cells
    Total,
    /// Number of reviewer cells holding this status
    StatusCount(ReviewStatus),
    Reviewer(String),
}

impl ColumnKind {
    pub fn header(&self) -> String {
        match self {
            ColumnKind::Request => "request".to_string(),
            ColumnKind::Title => "title".to_string(),
            ColumnKind::UpdatedAt => "updated_at".to_string(),
            ColumnKind::Total => TOTAL_HEADER.to_string(),
            ColumnKind::StatusCount(status) => status.glyph().to_string(),
            ColumnKind::Reviewer(login) => login.clone(),
        }
    }
}

/// Value of a single table cell. Empty cells render as "" in every output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Empty,
    Text(String),
    Count(usize),
}

/// One pull request's row
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixRow {
    pub id: PullRequestId,
    pub title: String,
    pub updated_at: DateTime<Utc>,
    /// Resolved status per reviewer column, parallel to `ReviewerMatrix::reviewers`
    pub cells: Vec<Option<ReviewStatus>>,
    pub total: usize,
    pub counts: BTreeMap<ReviewStatus, usize>,
}

impl MatrixRow {
    pub fn count(&self, status: ReviewStatus) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    pub fn approvals(&self) -> usize {
        self.count(ReviewStatus::Approved)
    }
}

/// The ranked reviewer matrix
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReviewerMatrix {
    /// Collaborator logins with at least one entry, alphabetical
    pub reviewers: Vec<String>,
    /// Statuses present anywhere in the reviewer columns, in rank order
    pub summary_statuses: Vec<ReviewStatus>,
    pub rows: Vec<MatrixRow>,
}

impl ReviewerMatrix {
    /// Columns in output order: request, title, updated_at, ⅀, per-status counts, reviewers
    pub fn columns(&self) -> Vec<ColumnKind> {
        let mut columns = vec![ColumnKind::Request, ColumnKind::Title, ColumnKind::UpdatedAt, ColumnKind::Total];
        columns.extend(self.summary_statuses.iter().map(|s| ColumnKind::StatusCount(*s)));
        columns.extend(self.reviewers.iter().map(|r| ColumnKind::Reviewer(r.clone())));
        columns
    }

    pub fn header(&self) -> Vec<String> {
        self.columns().iter().map(ColumnKind::header).collect()
    }

    /// Cell values for one row, aligned with `columns()`. Zero counts are empty.
    pub fn row_values(&self, row: &MatrixRow) -> Vec<CellValue> {
        let count_cell = |n: usize| if n == 0 { CellValue::Empty } else { CellValue::Count(n) };

        let mut values = vec![
            CellValue::Text(row.id.to_string()),
            CellValue::Text(row.title.clone()),
            CellValue::Text(format_timestamp(&row.updated_at)),
            count_cell(row.total),
        ];
        values.extend(self.summary_statuses.iter().map(|s| count_cell(row.count(*s))));
        values.extend(row.cells.iter().map(|cell| match cell {
            Some(status) => CellValue::Text(status.glyph().to_string()),
            None => CellValue::Empty,
        }));
        values
    }
}

/// Build the ranked matrix from fetched pull requests and the collaborator set.
pub fn build_matrix(prs: &[PullRequest], collaborators: &BTreeSet<String>) -> ReviewerMatrix {
    let entries = collect_entries(prs);
    let resolved = resolve_statuses(&entries);
    debug!("{} review entries resolved to {} pairs", entries.len(), resolved.len());

    let reviewers: Vec<String> = resolved
        .keys()
        .map(|(_, reviewer)| reviewer)
        .filter(|reviewer| collaborators.contains(*reviewer))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect();

    let mut rows: Vec<MatrixRow> = prs
        .iter()
        .map(|pr| {
            let cells: Vec<Option<ReviewStatus>> =
                reviewers.iter().map(|r| resolved.get(&(pr.id.clone(), r.clone())).copied()).collect();

            let mut counts: BTreeMap<ReviewStatus, usize> = BTreeMap::new();
            for status in cells.iter().flatten() {
                *counts.entry(*status).or_default() += 1;
            }

            MatrixRow {
                id: pr.id.clone(),
                title: pr.title.clone(),
                updated_at: pr.updated_at,
                total: counts.values().sum(),
                cells,
                counts,
            }
        })
        .collect();

    // Stable: equal rows keep fetch order
    rows.sort_by(|a, b| b.approvals().cmp(&a.approvals()).then_with(|| b.total.cmp(&a.total)));

    let summary_statuses: Vec<ReviewStatus> = ReviewStatus::ALL
        .iter()
        .copied()
        .filter(|status| rows.iter().any(|r| r.count(*status) > 0))
        .collect();

    debug!("Matrix has {} rows and {} reviewer columns", rows.len(), reviewers.len());

    ReviewerMatrix { reviewers, summary_statuses, rows }
}

#[cfg(test)]
#[path = "matrix_test.rs"]
mod matrix_test;
