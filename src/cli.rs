use anyhow::Result;
use clap::{Args, Parser};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{DEFAULT_API_URL, DEFAULT_MERGE_MARKER, DEFAULT_OUTPUT, DEFAULT_PAGE_SIZE};

#[derive(Parser)]
#[command(name = "commitlog")]
#[command(about = "Fetch a branch's commit history from GitHub and write a contributor report")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub run: RunArgs,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,
}

#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    #[arg(long, env = "OWNER", help = "Repository owner (user or organization)")]
    pub owner: Option<String>,

    #[arg(long, env = "REPO", help = "Repository name")]
    pub repo: Option<String>,

    #[arg(long, env = "BRANCH", help = "Branch to read history from")]
    pub branch: Option<String>,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "API token for higher rate limits and private repositories")]
    pub token: Option<String>,

    #[arg(long, help = "Commits requested per page (1-100)", default_value_t = DEFAULT_PAGE_SIZE)]
    pub per_page: u32,

    #[arg(long, help = "Base URL of the GitHub API", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[arg(long, value_parser = humantime::parse_duration, help = "Per-request timeout (e.g. 30s, 2m)")]
    pub timeout: Option<Duration>,

    #[arg(short, long, help = "Report file path", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    #[arg(long, help = "Write the report to standard output instead of a file")]
    pub stdout: bool,

    #[arg(long, help = "Output as JSON")]
    pub json: bool,

    #[arg(long, help = "Count merge commits toward contributor totals", default_value_t = false)]
    pub include_merges: bool,

    #[arg(long, help = "Message prefix that marks a merge commit", default_value = DEFAULT_MERGE_MARKER)]
    pub merge_marker: String,

    #[arg(long, help = "Omit the full commit log section")]
    pub no_log: bool,

    #[arg(long, help = "Show dates in UTC instead of local time")]
    pub utc: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        crate::util::init_tracing(self.verbose);
        crate::report::exec(self.run)
    }
}
