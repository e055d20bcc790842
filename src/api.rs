/// API module for fetching pull requests, reviews and collaborators
///
/// Responses are decoded into typed wire records here, and converted into
/// the domain types of `crate::types`. Any shape problem is reported with the
/// URL it came from, so nothing downstream has to deal with raw JSON.
use crate::config::{COLLABORATORS_PER_PAGE, REVIEWS_PER_PAGE, ReportConfig};
use crate::http::http_get_string;
use crate::types::{PullRequest, PullRequestId, RepositoryData, Review, ReviewStatus};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Deserialize)]
struct UserWire {
    login: String,
}

/// Requested reviewers may be teams, which have no login
#[derive(Debug, Deserialize)]
struct RequestedReviewerWire {
    login: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PullRequestWire {
    url: String,
    number: u64,
    title: String,
    updated_at: DateTime<Utc>,
    user: UserWire,
    #[serde(default)]
    requested_reviewers: Vec<RequestedReviewerWire>,
}

#[derive(Debug, Deserialize)]
struct ReviewWire {
    user: UserWire,
    state: String,
}

/// Build the URL listing open pull requests, most recently updated first
pub fn pulls_url(api_base: &str, repo: &str, per_page: usize) -> String {
    format!("{}/repos/{}/pulls?state=open&sort=updated&direction=desc&per_page={}", api_base, repo, per_page)
}

/// Build the URL listing the reviews of one pull request
pub fn reviews_url(pull_api_url: &str) -> String {
    format!("{}/reviews?per_page={}", pull_api_url, REVIEWS_PER_PAGE)
}

/// Build the URL listing a repository's collaborators
pub fn collaborators_url(api_base: &str, repo: &str) -> String {
    format!("{}/repos/{}/collaborators?per_page={}", api_base, repo, COLLABORATORS_PER_PAGE)
}

/// Fetch open pull requests (with reviews) and collaborators for one repository
pub fn fetch_repository(config: &ReportConfig, repo: &str) -> Result<RepositoryData, String> {
    let pull_requests = fetch_pull_requests_with_reviews(config, repo)?;
    let collaborators = fetch_collaborators(config, repo)?;

    Ok(RepositoryData { pull_requests, collaborators })
}

/// Fetch the first page of open pull requests and each one's reviews.
///
/// Only one page is requested; repositories with more open pull requests
/// than `per_page` are truncated to the most recently updated ones.
pub fn fetch_pull_requests_with_reviews(config: &ReportConfig, repo: &str) -> Result<Vec<PullRequest>, String> {
    let url = pulls_url(&config.api_base, repo, config.per_page);
    let body = http_get_string(&url, &config.token)?;
    let mut pulls = parse_pull_requests(&config.api_base, &url, &body)?;

    debug!("{} open pull requests in {}", pulls.len(), repo);
    if pulls.len() >= config.per_page {
        debug!("{} may have more than {} open pull requests; only the first page is used", repo, config.per_page);
    }

    for pull in &mut pulls {
        let url = reviews_url(&pull.id.api_url(&config.api_base));
        let body = http_get_string(&url, &config.token)?;
        pull.reviews = parse_reviews(&url, &body)?;
    }

    Ok(pulls)
}

/// Fetch the logins of a repository's collaborators (single page)
pub fn fetch_collaborators(config: &ReportConfig, repo: &str) -> Result<Vec<String>, String> {
    let url = collaborators_url(&config.api_base, repo);
    let body = http_get_string(&url, &config.token)?;
    parse_collaborators(&url, &body)
}

/// Decode a JSON body, naming the URL on failure
fn decode_json<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, String> {
    serde_json::from_str(body).map_err(|e| format!("Unexpected response from {}: {}", url, e))
}

/// Decode a pull request listing; reviews are left empty
pub fn parse_pull_requests(api_base: &str, url: &str, body: &str) -> Result<Vec<PullRequest>, String> {
    let pulls: Vec<PullRequestWire> = decode_json(url, body)?;
    pulls.into_iter().map(|p| into_pull_request(api_base, p)).collect()
}

/// Decode a review listing, dropping reviews whose state carries no disposition
pub fn parse_reviews(url: &str, body: &str) -> Result<Vec<Review>, String> {
    let reviews: Vec<ReviewWire> = decode_json(url, body)?;

    Ok(reviews
        .into_iter()
        .filter_map(|r| match ReviewStatus::from_review_state(&r.state) {
            Some(status) => Some(Review { reviewer: r.user.login, status }),
            None => {
                if r.state == "DISMISSED" || r.state == "PENDING" {
                    debug!("Dropping {} review by {}", r.state, r.user.login);
                } else {
                    warn!("Ignoring review by {} with unknown state {}", r.user.login, r.state);
                }
                None
            }
        })
        .collect())
}

/// Decode a collaborator listing into logins
pub fn parse_collaborators(url: &str, body: &str) -> Result<Vec<String>, String> {
    let users: Vec<UserWire> = decode_json(url, body)?;
    Ok(users.into_iter().map(|u| u.login).collect())
}

fn into_pull_request(api_base: &str, wire: PullRequestWire) -> Result<PullRequest, String> {
    let id = PullRequestId::from_api_url(api_base, &wire.url)?;
    if id.number != wire.number {
        return Err(format!("Pull request {} reports number {} but its URL is {}", id, wire.number, wire.url));
    }

    let mut requested_reviewers = Vec::with_capacity(wire.requested_reviewers.len());
    for requested in wire.requested_reviewers {
        match requested.login {
            Some(login) => requested_reviewers.push(login),
            None => warn!("Skipping requested reviewer without a login on {} (team review request?)", id),
        }
    }

    Ok(PullRequest {
        id,
        title: wire.title,
        updated_at: wire.updated_at,
        author: wire.user.login,
        requested_reviewers,
        reviews: Vec::new(),
    })
}
