use crate::cli::RunArgs;
use crate::error::{CommitLogError, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const DEFAULT_MERGE_MARKER: &str = "Merge pull request";
pub const DEFAULT_OUTPUT: &str = "output/commit_log.txt";

/// Everything the fetcher needs to page through one branch.
#[derive(Debug, Clone)]
pub struct Config {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub token: Option<String>,
    pub per_page: u32,
    pub api_url: String,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    File(PathBuf),
    Stdout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub exclude_merges: bool,
    pub merge_marker: String,
    pub include_log: bool,
    pub local_time: bool,
    pub format: Format,
    pub destination: Destination,
}

#[cfg(test)]
impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            exclude_merges: true,
            merge_marker: DEFAULT_MERGE_MARKER.to_string(),
            include_log: true,
            local_time: true,
            format: Format::Text,
            destination: Destination::File(PathBuf::from(DEFAULT_OUTPUT)),
        }
    }
}

impl Config {
    /// Validate parsed arguments. Runs before any request is made.
    pub fn from_args(args: &RunArgs) -> Result<(Config, ReportOptions)> {
        let owner = repository_name(required(&args.owner, "OWNER")?, "OWNER")?;
        let repo = repository_name(required(&args.repo, "REPO")?, "REPO")?;
        let branch = required(&args.branch, "BRANCH")?;

        if !(1..=100).contains(&args.per_page) {
            return Err(CommitLogError::Configuration(format!(
                "per-page must be between 1 and 100, got {}",
                args.per_page
            )));
        }

        let api_url = args.api_url.trim().trim_end_matches('/').to_string();
        if let Err(e) = reqwest::Url::parse(&api_url) {
            return Err(CommitLogError::Configuration(format!("invalid api-url {api_url:?}: {e}")));
        }

        let config = Config {
            owner,
            repo,
            branch,
            token: args
                .token
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            per_page: args.per_page,
            api_url,
            timeout: args.timeout,
        };

        let options = ReportOptions {
            exclude_merges: !args.include_merges,
            merge_marker: args.merge_marker.clone(),
            include_log: !args.no_log,
            local_time: !args.utc,
            format: if args.json { Format::Json } else { Format::Text },
            destination: if args.stdout {
                Destination::Stdout
            } else {
                Destination::File(args.output.clone())
            },
        };

        Ok((config, options))
    }

    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

fn required(value: &Option<String>, var: &str) -> Result<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| CommitLogError::missing(var))
}

/// Owner and repository names travel as URL path segments; only the
/// characters GitHub allows in them are accepted.
fn repository_name(value: String, var: &str) -> Result<String> {
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if !allowed || value == "." || value == ".." {
        return Err(CommitLogError::Configuration(format!(
            "{var} {value:?} is not a valid name (allowed: A-Z a-z 0-9 . _ -)"
        )));
    }
    Ok(value)
}
