/// Core data structures for pull requests and review dispositions
///
/// This module defines the records produced by the fetcher and consumed by
/// the matrix builder. Everything here is immutable once constructed.
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

/// A reviewer's disposition on one pull request.
///
/// Variants are declared in ascending precedence; the derived `Ord` is the
/// ranking used to resolve several entries for the same reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReviewStatus {
    Requested,
    Commented,
    RequestChanges,
    Approved,
    Author,
}

impl ReviewStatus {
    /// Every status, lowest precedence first
    pub const ALL: [ReviewStatus; 5] = [
        ReviewStatus::Requested,
        ReviewStatus::Commented,
        ReviewStatus::RequestChanges,
        ReviewStatus::Approved,
        ReviewStatus::Author,
    ];

    /// Glyph shown in a matrix cell and used as the summary column header.
    pub fn glyph(&self) -> &'static str {
        match self {
            ReviewStatus::Requested => "?",
            ReviewStatus::Commented => "💬",
            ReviewStatus::RequestChanges => "❌",
            ReviewStatus::Approved => "✅",
            ReviewStatus::Author => "✏️",
        }
    }

    /// Map a submitted review state from the API.
    ///
    /// Returns None for states that carry no disposition (DISMISSED, PENDING)
    /// or that we don't recognise.
    pub fn from_review_state(state: &str) -> Option<Self> {
        match state {
            "COMMENTED" => Some(ReviewStatus::Commented),
            "CHANGES_REQUESTED" | "REQUEST_CHANGES" => Some(ReviewStatus::RequestChanges),
            "APPROVED" => Some(ReviewStatus::Approved),
            _ => None,
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Identifies a pull request across repositories: `owner/name#number`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PullRequestId {
    pub repo: String,
    pub number: u64,
}

impl PullRequestId {
    /// Derive the identifier from the API URL of a pull request,
    /// e.g. `https://api.github.com/repos/owner/name/pulls/42`.
    pub fn from_api_url(api_base: &str, url: &str) -> Result<Self, String> {
        let mismatch = || format!("Unexpected pull request URL '{}' (expected {}/repos/OWNER/NAME/pulls/NUMBER)", url, api_base);

        let rest = url.strip_prefix(api_base).and_then(|r| r.strip_prefix("/repos/")).ok_or_else(mismatch)?;
        let (repo, number) = rest.rsplit_once("/pulls/").ok_or_else(mismatch)?;

        if repo.is_empty() || number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(mismatch());
        }
        let number = number.parse::<u64>().map_err(|_| mismatch())?;

        Ok(PullRequestId { repo: repo.to_string(), number })
    }

    /// API URL of the pull request, the inverse of `from_api_url`
    pub fn api_url(&self, api_base: &str) -> String {
        format!("{}/repos/{}/pulls/{}", api_base, self.repo, self.number)
    }

    /// Human-facing URL of the pull request on the hosting site
    pub fn web_url(&self, web_base: &str) -> String {
        format!("{}/{}/pull/{}", web_base, self.repo, self.number)
    }
}

impl fmt::Display for PullRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.repo, self.number)
    }
}

/// One submitted review
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub reviewer: String,
    pub status: ReviewStatus,
}

/// An open pull request together with its review history
#[derive(Debug, Clone, PartialEq)]
pub struct PullRequest {
    pub id: PullRequestId,
    pub title: String,
    pub updated_at: DateTime<Utc>,
    pub author: String,
    /// Logins of reviewers whose review is still requested (users only)
    pub requested_reviewers: Vec<String>,
    pub reviews: Vec<Review>,
}

/// Render a timestamp in the API's own notation, e.g. `2024-03-01T12:30:00Z`
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Everything fetched for one repository
#[derive(Debug, Clone, Default)]
pub struct RepositoryData {
    pub pull_requests: Vec<PullRequest>,
    pub collaborators: Vec<String>,
}
