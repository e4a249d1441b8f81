//! GitHub REST API client.
//!
//! Thin `reqwest` wrapper implementing [`RepoHost`]. Responses are
//! decoded into `serde_json::Value` and picked apart field-by-field;
//! the commit and file orderings GitHub returns are preserved as-is.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;

use crate::constants::APP_NAME;

use super::{ChangedFile, CommitRef, GithubError, PullRequest, RepoHost, RepoId};

const API_BASE: &str = "https://api.github.com";

/// GitHub REST client authenticated with the workflow token.
pub struct GithubClient {
    http: reqwest::Client,
    token: String,
}

impl GithubClient {
    pub fn new(token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
        }
    }

    /// Issue a GET request and decode the JSON body.
    async fn get_json(&self, url: &str) -> Result<Value, GithubError> {
        let response = self
            .http
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", APP_NAME)
            .send()
            .await
            .map_err(|e| GithubError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GithubError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| GithubError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RepoHost for GithubClient {
    async fn get_pull_request(
        &self,
        repo: &RepoId,
        number: u64,
    ) -> Result<PullRequest, GithubError> {
        let url = format!(
            "{API_BASE}/repos/{}/{}/pulls/{number}",
            repo.owner, repo.name
        );
        let data = self.get_json(&url).await?;
        Ok(PullRequest {
            number: data["number"].as_u64().unwrap_or(number),
            body: data["body"].as_str().map(str::to_string),
        })
    }

    async fn list_commits(
        &self,
        repo: &RepoId,
        number: u64,
    ) -> Result<Vec<CommitRef>, GithubError> {
        let url = format!(
            "{API_BASE}/repos/{}/{}/pulls/{number}/commits",
            repo.owner, repo.name
        );
        let data = self.get_json(&url).await?;
        let commits = data
            .as_array()
            .ok_or_else(|| GithubError::Decode("commit list is not an array".into()))?;
        Ok(commits
            .iter()
            .map(|c| CommitRef {
                sha: c["sha"].as_str().unwrap_or_default().to_string(),
                message: c["commit"]["message"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect())
    }

    async fn get_commit_files(
        &self,
        repo: &RepoId,
        sha: &str,
    ) -> Result<Vec<ChangedFile>, GithubError> {
        let url = format!(
            "{API_BASE}/repos/{}/{}/commits/{sha}",
            repo.owner, repo.name
        );
        let data = self.get_json(&url).await?;
        let files = match data["files"].as_array() {
            Some(files) => files,
            // A commit with no file list (e.g. an empty commit) reviews
            // as zero files rather than an error.
            None => return Ok(Vec::new()),
        };
        Ok(files
            .iter()
            .map(|f| ChangedFile {
                filename: f["filename"].as_str().unwrap_or_default().to_string(),
                patch: f["patch"].as_str().map(str::to_string),
            })
            .collect())
    }

    async fn read_file(&self, repo: &RepoId, path: &str) -> Result<String, GithubError> {
        let url = format!(
            "{API_BASE}/repos/{}/{}/contents/{path}",
            repo.owner, repo.name
        );
        let data = self.get_json(&url).await?;
        let encoded = data["content"]
            .as_str()
            .ok_or_else(|| GithubError::Decode(format!("{path} has no inline content")))?;
        // The contents API wraps base64 at 60 columns; strip the newlines
        // before decoding.
        let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = BASE64
            .decode(compact.as_bytes())
            .map_err(|e| GithubError::Decode(format!("invalid base64 in {path}: {e}")))?;
        String::from_utf8(bytes)
            .map_err(|e| GithubError::Decode(format!("{path} is not valid UTF-8: {e}")))
    }

    async fn post_comment(
        &self,
        repo: &RepoId,
        issue_number: u64,
        body: &str,
    ) -> Result<(), GithubError> {
        let url = format!(
            "{API_BASE}/repos/{}/{}/issues/{issue_number}/comments",
            repo.owner, repo.name
        );
        let response = self
            .http
            .post(&url)
            .header("Accept", "application/vnd.github+json")
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", APP_NAME)
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await
            .map_err(|e| GithubError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GithubError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
