pub mod aggregate;
pub mod output;
pub mod render;

pub use aggregate::{count_merges, summarize, tally_contributors, Summary};
pub use output::{emit, print_summary, write_file};
pub use render::{render_json, render_text};

use crate::cli::RunArgs;
use crate::config::{Config, Destination, Format};
use crate::github::{fetch_commits_with_progress, GitHubClient};
use anyhow::Context;
use console::Term;
use tracing::{info, warn};

pub fn exec(args: RunArgs) -> anyhow::Result<()> {
    let (config, options) = Config::from_args(&args)?;
    let slug = config.slug();

    let client = GitHubClient::new(config).context("Failed to build HTTP client")?;
    let show_progress =
        options.destination != Destination::Stdout && Term::stderr().is_term();

    let commits = match fetch_commits_with_progress(&client, show_progress) {
        Ok(commits) => commits,
        Err(e) => {
            if e.is_rate_limited() && client.config().token.is_none() {
                warn!("anonymous requests are rate limited; set GITHUB_TOKEN to raise the limit");
            }
            return Err(anyhow::Error::new(e).context(format!("Failed to fetch commits for {slug}")));
        }
    };
    let config = client.config();
    info!(repo = %slug, branch = %config.branch, commits = commits.len(), "fetch complete");

    let summary = summarize(&commits, &options);
    let content = match options.format {
        Format::Text => render_text(&slug, &commits, &summary, &options),
        Format::Json => render_json(config, &commits, &summary).context("Failed to render JSON report")?,
    };

    if let Some(path) = emit(&options.destination, &content).context("Failed to write report")? {
        print_summary(config, &summary, &path);
    }

    Ok(())
}
