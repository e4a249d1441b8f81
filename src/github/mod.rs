//! Repository host abstraction.
//!
//! The pipeline talks to GitHub through the [`RepoHost`] trait so the
//! aggregator and unit processors can be tested against a fake host
//! instead of live network calls.

pub mod client;

use async_trait::async_trait;
use thiserror::Error;

pub use client::GithubClient;

/// Errors from the repository host.
#[derive(Error, Debug)]
pub enum GithubError {
    #[error("GitHub API request failed: {0}")]
    Request(String),

    #[error("GitHub API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected GitHub API response: {0}")]
    Decode(String),
}

/// Identifies the repository a run operates on.
#[derive(Debug, Clone)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

/// A pull request as resolved for review.
#[derive(Debug, Clone)]
pub struct PullRequest {
    pub number: u64,
    pub body: Option<String>,
}

/// One commit in a pull request, in API order.
#[derive(Debug, Clone)]
pub struct CommitRef {
    pub sha: String,
    pub message: String,
}

/// One changed file within a commit, in API order.
///
/// `patch` is absent for binary files and other diffs GitHub does not
/// inline.
#[derive(Debug, Clone)]
pub struct ChangedFile {
    pub filename: String,
    pub patch: Option<String>,
}

/// Capability interface over the repository host API.
///
/// Read failures for the guidance file are handled as non-fatal by the
/// caller; everything else propagates.
#[async_trait]
pub trait RepoHost: Send + Sync {
    /// Fetch pull request metadata by number.
    async fn get_pull_request(&self, repo: &RepoId, number: u64)
        -> Result<PullRequest, GithubError>;

    /// List a pull request's commits, in the order GitHub returns them.
    async fn list_commits(&self, repo: &RepoId, number: u64)
        -> Result<Vec<CommitRef>, GithubError>;

    /// Fetch the changed files of one commit, in the order GitHub returns them.
    async fn get_commit_files(
        &self,
        repo: &RepoId,
        sha: &str,
    ) -> Result<Vec<ChangedFile>, GithubError>;

    /// Read a repository file's decoded content by path.
    async fn read_file(&self, repo: &RepoId, path: &str) -> Result<String, GithubError>;

    /// Post a comment on an issue or pull request.
    async fn post_comment(
        &self,
        repo: &RepoId,
        issue_number: u64,
        body: &str,
    ) -> Result<(), GithubError>;
}
