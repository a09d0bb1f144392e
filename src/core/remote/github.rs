use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::config::GitHubConfig;
use crate::error::{TestwardenError, Result};
use super::{IssueState, IssueTracker, SourceProvider};

/// GitHub REST client backing both remote collaborator traits.
pub struct GitHubClient {
    client: reqwest::Client,
    api_base: String,
    owner: String,
    repo: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig, owner: &str, repo: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            token: config.resolved_token(),
        })
    }

    fn request(&self, url: &str, accept: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .get(url)
            .header("User-Agent", concat!("testwarden/", env!("CARGO_PKG_VERSION")))
            .header("Accept", accept);

        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        request
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self.request(url, "application/vnd.github+json").send().await?;
        let response = check_status(url, response)?;
        response.json::<Value>().await.map_err(Into::into)
    }
}

fn check_status(url: &str, response: reqwest::Response) -> Result<reqwest::Response> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::NOT_FOUND => Err(TestwardenError::NotFound(url.to_string())),
        status => Err(TestwardenError::Fetch(format!(
            "GitHub API error {} for {}",
            status, url
        ))),
    }
}

#[async_trait]
impl SourceProvider for GitHubClient {
    async fn list_files(&self, branch: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.api_base, self.owner, self.repo, branch
        );
        let tree = self.get_json(&url).await?;

        let entries = tree["tree"].as_array().ok_or_else(|| {
            TestwardenError::Fetch(format!("Malformed tree response for branch {}", branch))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            if entry["type"].as_str() == Some("blob") {
                if let Some(path) = entry["path"].as_str() {
                    paths.push(path.to_string());
                }
            }
        }

        debug!("Listed {} files on branch {}", paths.len(), branch);
        Ok(paths)
    }

    async fn read_file(&self, branch: &str, path: &str) -> Result<String> {
        let url = format!(
            "{}/repos/{}/{}/contents/{}?ref={}",
            self.api_base, self.owner, self.repo, path, branch
        );

        // The raw media type returns file text directly instead of the
        // base64-wrapped JSON envelope.
        let response = self.request(&url, "application/vnd.github.raw+json").send().await?;
        let response = check_status(&url, response)?;
        response.text().await.map_err(Into::into)
    }
}

#[async_trait]
impl IssueTracker for GitHubClient {
    async fn issue_state(&self, owner: &str, repo: &str, number: u64) -> Result<IssueState> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}",
            self.api_base, owner, repo, number
        );
        let issue = self.get_json(&url).await?;

        match issue["state"].as_str() {
            Some("closed") => Ok(IssueState::Closed),
            Some(_) => Ok(IssueState::Open),
            None => Err(TestwardenError::Fetch(format!(
                "Malformed issue response for {}",
                url
            ))),
        }
    }
}
