use crate::config::{Config, ReportOptions};
use crate::error::Result;
use crate::model::{CommitRecord, ReportOutput, SCHEMA_VERSION};
use crate::util::{display_date, plural};
use chrono::Utc;
use std::fmt::Write;

use super::aggregate::Summary;

const NAME_WIDTH: usize = 20;
const COUNT_WIDTH: usize = 4;
const UNKNOWN_AUTHOR: &str = "unknown";

pub fn render_text(
    slug: &str,
    commits: &[CommitRecord],
    summary: &Summary,
    options: &ReportOptions,
) -> String {
    let header = format!("==== Commit Log for: {slug}  ====");
    let width = header.chars().count();
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{header}");
    let _ = writeln!(out);
    let _ = writeln!(out, "- Commit Count: {}", summary.commit_count);
    let _ = writeln!(out, "- {} Merged pull requests", summary.merged_pull_requests);
    let _ = writeln!(out, "- {} Contributors:", summary.contributors.len());
    for c in &summary.contributors {
        let _ = writeln!(
            out,
            "  - {:<name_w$}: {:<count_w$} {}",
            c.name.as_deref().unwrap_or(UNKNOWN_AUTHOR),
            c.commits,
            plural(c.commits, "commit"),
            name_w = NAME_WIDTH,
            count_w = COUNT_WIDTH,
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "=".repeat(width));

    if options.include_log {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}==== Full Commit Log ====", " ".repeat(width * 3 / 10));
        for commit in commits {
            let date = commit
                .timestamp
                .as_ref()
                .map(|ts| display_date(ts, options.local_time))
                .unwrap_or_else(|| "unknown date".to_string());
            let _ = writeln!(out);
            let _ = writeln!(out, "- {} - {}", commit.hash, commit.message);
            let _ = writeln!(
                out,
                "  By: {} on {}",
                commit.author.as_deref().unwrap_or(UNKNOWN_AUTHOR),
                date
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out);
    let _ = writeln!(out, "Generated with: commitlog {}", env!("CARGO_PKG_VERSION"));
    out
}

pub fn render_json(config: &Config, commits: &[CommitRecord], summary: &Summary) -> Result<String> {
    let output = ReportOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        owner: &config.owner,
        repo: &config.repo,
        branch: &config.branch,
        commit_count: summary.commit_count,
        merged_pull_requests: summary.merged_pull_requests,
        contributors: &summary.contributors,
        commits,
    };
    Ok(serde_json::to_string_pretty(&output)?)
}
