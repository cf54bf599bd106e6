use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SCHEMA_VERSION: u32 = 1;
pub const SHORT_HASH_LEN: usize = 7;

/// Account identifier as returned by the API. GitHub sends integers, but
/// compatible servers may send strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorId {
    Number(u64),
    Text(String),
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthorId::Number(n) => write!(f, "{n}"),
            AuthorId::Text(s) => f.write_str(s),
        }
    }
}

/// One element of the `GET /repos/{owner}/{repo}/commits` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCommit {
    pub sha: String,
    pub commit: RawCommitDetail,
    #[serde(default)]
    pub author: Option<RawAccount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCommitDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub author: Option<RawSignature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSignature {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAccount {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub id: Option<AuthorId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitRecord {
    pub hash: String,
    pub message: String,
    pub author: Option<String>,
    pub author_id: Option<AuthorId>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl CommitRecord {
    pub fn is_merge(&self, marker: &str) -> bool {
        !marker.is_empty() && self.message.starts_with(marker)
    }
}

impl From<RawCommit> for CommitRecord {
    fn from(raw: RawCommit) -> Self {
        let RawCommit { sha, commit, author } = raw;
        let (login, author_id) = match author {
            Some(account) => (account.login, account.id),
            None => (None, None),
        };
        let (fallback_name, timestamp) = match commit.author {
            Some(sig) => (sig.name, sig.date),
            None => (None, None),
        };

        Self {
            hash: sha.chars().take(SHORT_HASH_LEN).collect(),
            message: commit.message.lines().next().unwrap_or("").to_string(),
            author: login.or(fallback_name),
            author_id,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contributor {
    pub author_id: AuthorId,
    pub name: Option<String>,
    pub commits: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportOutput<'a> {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub owner: &'a str,
    pub repo: &'a str,
    pub branch: &'a str,
    pub commit_count: usize,
    pub merged_pull_requests: usize,
    pub contributors: &'a [Contributor],
    pub commits: &'a [CommitRecord],
}
