/// Configuration resolution module
///
/// This module handles:
/// - Building a ReportConfig from CLI arguments
/// - Resolving the API base URL (flag, environment, default)
/// - Deriving the web base URL used for hyperlinks
use crate::cli::CliArgs;
use log::debug;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_WEB_URL: &str = "https://github.com";

/// Environment variable consulted when --api-url isn't given
pub const API_URL_ENV: &str = "REVIEWER_MATRIX_API_URL";

/// Reviews and collaborators are fetched as a single page of this size
pub const REVIEWS_PER_PAGE: usize = 100;
pub const COLLABORATORS_PER_PAGE: usize = 100;

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub repos: Vec<String>,
    pub token: String,
    pub api_base: String,
    pub web_base: String,
    pub per_page: usize,
    pub output: PathBuf,
    pub json_output: Option<PathBuf>,
    pub quiet: bool,
}

/// Build a complete ReportConfig from CLI arguments
///
/// Uses the process environment for anything the command line leaves open.
pub fn build_report_config(args: &CliArgs) -> Result<ReportConfig, String> {
    let env_api_url = env::var(API_URL_ENV).ok();
    build_report_config_with_env(args, env_api_url.as_deref())
}

/// Build a ReportConfig, taking the environment fallback explicitly
pub fn build_report_config_with_env(args: &CliArgs, env_api_url: Option<&str>) -> Result<ReportConfig, String> {
    let raw_api = args
        .api_url
        .as_deref()
        .or(env_api_url.filter(|s| !s.trim().is_empty()))
        .unwrap_or(DEFAULT_API_URL);

    let api_base = normalize_base_url(raw_api)?;
    let web_base = derive_web_base(&api_base);
    debug!("API base {}, web base {}", api_base, web_base);

    // Same repository twice would fetch (and list) every pull request twice
    let mut repos: Vec<String> = Vec::with_capacity(args.repos.len());
    for repo in &args.repos {
        if !repos.contains(repo) {
            repos.push(repo.clone());
        } else {
            debug!("Ignoring duplicate repository {}", repo);
        }
    }

    Ok(ReportConfig {
        repos,
        token: args.token.clone(),
        api_base,
        web_base,
        per_page: args.per_page,
        output: args.output.clone(),
        json_output: args.json_output.clone(),
        quiet: args.quiet,
    })
}

/// Trim trailing slashes and check the scheme
fn normalize_base_url(url: &str) -> Result<String, String> {
    let url = url.trim().trim_end_matches('/');
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(format!("API URL must start with http:// or https:// (got '{}')", url));
    }
    if url.split_once("://").map(|(_, host)| host.is_empty()).unwrap_or(true) {
        return Err(format!("API URL '{}' has no host", url));
    }
    Ok(url.to_string())
}

/// Map an API base URL to the site that serves pull requests to humans
///
/// - `https://api.github.com` → `https://github.com`
/// - `https://git.example.com/api/v3` → `https://git.example.com`
/// - anything else is assumed to serve both
fn derive_web_base(api_base: &str) -> String {
    if api_base == DEFAULT_API_URL {
        return DEFAULT_WEB_URL.to_string();
    }
    if let Some(host) = api_base.strip_suffix("/api/v3") {
        return host.to_string();
    }
    if let Some((scheme, host)) = api_base.split_once("://")
        && let Some(rest) = host.strip_prefix("api.")
    {
        return format!("{}://{}", scheme, rest);
    }
    api_base.to_string()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
