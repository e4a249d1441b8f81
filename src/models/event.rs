//! Webhook event payload types.
//!
//! Only the fields the pipeline reads are modeled; everything else in
//! the payload is ignored by serde. The same struct covers both trigger
//! shapes ("pull request opened" and "issue comment created") with the
//! shape-specific parts optional.

use serde::Deserialize;

/// Action string on a "pull request opened" event.
pub const ACTION_OPENED: &str = "opened";

/// Action string on an "issue comment created" event.
pub const ACTION_CREATED: &str = "created";

/// A webhook event as delivered by the action runner.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerEvent {
    pub action: String,
    pub repository: Repository,
    /// Present on pull-request events.
    #[serde(default)]
    pub pull_request: Option<PullRequestPayload>,
    /// Present on issue-comment events. For comments on a PR, the issue
    /// number is the PR number.
    #[serde(default)]
    pub issue: Option<IssuePayload>,
    #[serde(default)]
    pub comment: Option<CommentPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    pub owner: Owner,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Owner {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestPayload {
    pub number: u64,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssuePayload {
    pub number: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentPayload {
    pub body: String,
}
