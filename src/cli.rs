use clap::Parser;
use std::path::PathBuf;

/// Largest page size the hosted API accepts
pub const MAX_PER_PAGE: usize = 100;

#[derive(Parser, Debug, Clone)]
#[command(name = "reviewer-matrix")]
#[command(about = "Tabulate who has reviewed which open pull requests into a spreadsheet")]
#[command(version)]
pub struct CliArgs {
    /// Repository to include, as OWNER/NAME
    /// Can be given multiple times: -r org/app -r org/lib
    #[arg(long = "repo", short = 'r', value_name = "OWNER/NAME")]
    pub repos: Vec<String>,

    /// Access token sent as a bearer token with every API call
    #[arg(value_name = "TOKEN")]
    pub token: String,

    /// Path of the spreadsheet (.xlsx) to write
    #[arg(value_name = "OUTPUT_PATH")]
    pub output: PathBuf,

    /// Number of open pull requests to fetch per repository (single page, max 100)
    #[arg(long, default_value = "100")]
    pub per_page: usize,

    /// Base URL of the REST API (default: $REVIEWER_MATRIX_API_URL or https://api.github.com)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Also export the matrix as JSON to this path
    #[arg(long = "json", value_name = "PATH")]
    pub json_output: Option<PathBuf>,

    /// Don't print the summary table after writing the spreadsheet
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        let mut args = CliArgs::parse();

        // Tolerate stray whitespace around repository names pasted from elsewhere
        args.repos = args.repos.iter().map(|r| r.trim().to_string()).collect();
        args.token = args.token.trim().to_string();

        args
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if self.repos.is_empty() {
            return Err("Must specify at least one repository with -r/--repo OWNER/NAME".to_string());
        }

        for repo in &self.repos {
            validate_repo_name(repo)?;
        }

        if self.token.is_empty() {
            return Err("Access token must not be empty".to_string());
        }

        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(format!("--per-page must be between 1 and {} (got {})", MAX_PER_PAGE, self.per_page));
        }

        if let Some(ref json) = self.json_output
            && *json == self.output
        {
            return Err(format!("--json path must differ from the spreadsheet path ({})", json.display()));
        }

        Ok(())
    }
}

/// Check a repository identifier has the `owner/name` shape
pub fn validate_repo_name(repo: &str) -> Result<(), String> {
    match repo.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => Ok(()),
        _ => Err(format!("Invalid repository '{}': expected OWNER/NAME", repo)),
    }
}
