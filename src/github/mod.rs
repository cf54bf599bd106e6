pub mod client;
pub mod fetch;

pub use client::GitHubClient;
pub use fetch::{fetch_commits_with_progress, CommitPages};
