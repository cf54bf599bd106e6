use crate::config::Config;
use crate::error::{CommitLogError, Result};
use crate::model::RawCommit;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use super::fetch::CommitPages;

const USER_AGENT: &str = concat!("commitlog/", env!("CARGO_PKG_VERSION"));

/// Blocking client for `GET /repos/{owner}/{repo}/commits`.
pub struct GitHubClient {
    client: Client,
    config: Config,
    commits_url: Url,
}

#[derive(Deserialize)]
struct ApiMessage {
    message: Option<String>,
}

impl GitHubClient {
    pub fn new(config: Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            commits_url: commits_url(&config)?,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn page_request(&self, page: u32) -> RequestBuilder {
        let request = self.client.get(self.commits_url.clone()).query(&[
            ("sha", self.config.branch.clone()),
            ("per_page", self.config.per_page.to_string()),
            ("page", page.to_string()),
        ]);
        match &self.config.token {
            Some(token) => request.header(AUTHORIZATION, format!("token {token}")),
            None => request,
        }
    }
}

/// `{api_url}/repos/{owner}/{repo}/commits`, with owner and repo pushed as
/// encoded path segments.
fn commits_url(config: &Config) -> Result<Url> {
    let invalid = |detail: String| {
        CommitLogError::Configuration(format!("invalid api-url {:?}: {detail}", config.api_url))
    };
    let mut url = Url::parse(&config.api_url).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("cannot be a base URL".to_string()))?
        .pop_if_empty()
        .extend(["repos", config.owner.as_str(), config.repo.as_str(), "commits"]);
    Ok(url)
}

impl CommitPages for GitHubClient {
    fn fetch_page(&self, page: u32) -> Result<Vec<RawCommit>> {
        let response = self.page_request(page).send()?;
        let status = response.status();
        debug!(page, status = status.as_u16(), "commit page response");

        if !status.is_success() {
            return Err(status_error(response));
        }

        Ok(response.json::<Vec<RawCommit>>()?)
    }
}

fn status_error(response: Response) -> CommitLogError {
    let status = response.status();
    let rate_limited = matches!(status.as_u16(), 403 | 429)
        && response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            == Some("0");

    let message = response
        .json::<ApiMessage>()
        .ok()
        .and_then(|body| body.message)
        .filter(|m| !m.is_empty());

    let detail = if rate_limited {
        Some(match message {
            Some(m) => format!("rate limit exceeded; {m}"),
            None => "rate limit exceeded; set GITHUB_TOKEN for a higher limit".to_string(),
        })
    } else {
        message
    };

    CommitLogError::Http {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: Option<&str>) -> Config {
        Config {
            owner: "acme".to_string(),
            repo: "widgets".to_string(),
            branch: "main".to_string(),
            token: token.map(str::to_string),
            per_page: 100,
            api_url: "https://api.github.com".to_string(),
            timeout: None,
        }
    }

    #[test]
    fn page_request_carries_query_parameters() {
        let client = GitHubClient::new(config(None)).unwrap();
        let request = client.page_request(3).build().unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://api.github.com/repos/acme/widgets/commits?sha=main&per_page=100&page=3"
        );
    }

    #[test]
    fn api_url_path_prefix_is_kept() {
        let mut cfg = config(None);
        cfg.api_url = "http://localhost:8080/api/v3".to_string();
        let client = GitHubClient::new(cfg).unwrap();
        let request = client.page_request(1).build().unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://localhost:8080/api/v3/repos/acme/widgets/commits?sha=main&per_page=100&page=1"
        );
    }

    #[test]
    fn owner_and_repo_cannot_escape_their_segments() {
        let mut cfg = config(None);
        cfg.owner = "a/b".to_string();
        cfg.repo = "w#x?y".to_string();
        let client = GitHubClient::new(cfg).unwrap();
        let request = client.page_request(1).build().unwrap();
        assert_eq!(request.url().path(), "/repos/a%2Fb/w%23x%3Fy/commits");
        assert_eq!(request.url().fragment(), None);
        assert_eq!(request.url().query(), Some("sha=main&per_page=100&page=1"));
    }

    #[test]
    fn mailto_api_url_is_configuration_error() {
        let mut cfg = config(None);
        cfg.api_url = "mailto:someone@example.com".to_string();
        assert!(matches!(
            GitHubClient::new(cfg),
            Err(CommitLogError::Configuration(_))
        ));
    }

    #[test]
    fn authorization_only_sent_with_token() {
        let anonymous = GitHubClient::new(config(None)).unwrap();
        let request = anonymous.page_request(1).build().unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());

        let authed = GitHubClient::new(config(Some("abc123"))).unwrap();
        let request = authed.page_request(1).build().unwrap();
        assert_eq!(
            request.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("token abc123")
        );
    }

    #[test]
    fn branch_names_are_query_encoded() {
        let mut cfg = config(None);
        cfg.branch = "feature/a b".to_string();
        let client = GitHubClient::new(cfg).unwrap();
        let request = client.page_request(1).build().unwrap();
        assert_eq!(request.url().query(), Some("sha=feature%2Fa+b&per_page=100&page=1"));
    }
}
