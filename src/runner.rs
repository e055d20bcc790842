use crate::api;
use crate::config::ReportConfig;
use crate::matrix::{self, ReviewerMatrix};
use crate::types::{PullRequest, RepositoryData};
use crate::ui;
use log::debug;
use std::collections::BTreeSet;

/// Everything fetched across all requested repositories
#[derive(Debug, Default)]
pub struct FetchedData {
    pub pull_requests: Vec<PullRequest>,
    /// Union of collaborator logins over every repository
    pub collaborators: BTreeSet<String>,
}

/// Fetch every repository in order and merge the results.
///
/// The fetch callback is invoked once per repository; the first error aborts.
pub fn collect_repositories<F>(repos: &[String], mut fetch: F) -> Result<FetchedData, String>
where
    F: FnMut(&str) -> Result<RepositoryData, String>,
{
    let mut data = FetchedData::default();

    for repo in repos {
        let fetched = fetch(repo)?;
        debug!(
            "{}: {} pull requests, {} collaborators",
            repo,
            fetched.pull_requests.len(),
            fetched.collaborators.len()
        );
        data.pull_requests.extend(fetched.pull_requests);
        data.collaborators.extend(fetched.collaborators);
    }

    Ok(data)
}

/// Fetch all repositories named in the config and build the ranked matrix
pub fn build_report(config: &ReportConfig) -> Result<ReviewerMatrix, String> {
    let data = collect_repositories(&config.repos, |repo| {
        ui::status(&format!("fetching open pull requests for {}", repo));
        api::fetch_repository(config, repo)
    })?;

    ui::status(&format!(
        "building matrix from {} pull requests and {} collaborators",
        data.pull_requests.len(),
        data.collaborators.len()
    ));

    Ok(matrix::build_matrix(&data.pull_requests, &data.collaborators))
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod runner_test;
