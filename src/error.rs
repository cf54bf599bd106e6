use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CommitLogError>;

#[derive(Error, Debug)]
pub enum CommitLogError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("GitHub API error: {status} {reason}{}", fmt_detail(.detail))]
    Http {
        status: u16,
        reason: String,
        detail: Option<String>,
    },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Failed to write report to {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

fn fmt_detail(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(" ({d})")).unwrap_or_default()
}

impl CommitLogError {
    pub fn missing(var: &str) -> Self {
        CommitLogError::Configuration(format!("missing required value {var}"))
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            CommitLogError::Http { detail: Some(d), .. } if d.starts_with("rate limit exceeded")
        )
    }
}
