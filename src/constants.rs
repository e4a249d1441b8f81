//! App-wide constants.
//!
//! Centralises the bot name, the guidance file path, environment variable
//! names, and every fixed user-visible message string so a rename only
//! requires changing this file.

/// Display name of the bot (lowercase).
pub const APP_NAME: &str = "critiq";

/// Repository guidance file fetched from the repo root on every run.
pub const GUIDANCE_FILENAME: &str = "CRITIQ.md";

/// Default interval between run-status polls, in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;


// ── Environment variable names ──────────────────────────────────────

/// Path to the webhook event payload, set by the action runner.
pub const ENV_EVENT_PATH: &str = "GITHUB_EVENT_PATH";

pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_ASSISTANT_ID: &str = "CRITIQ_ASSISTANT_ID";
pub const ENV_POLL_INTERVAL: &str = "CRITIQ_POLL_INTERVAL_SECS";


// ── Fixed message strings ───────────────────────────────────────────

/// Substring that summons the bot when present in a PR comment.
pub const SUMMON_MARKER: &str = "critiq";

/// Marker prefixed to every posted report. A comment containing this is
/// one of our own and must never re-trigger a review.
pub const AUTHOR_MARKER: &str = "The following is a message from critiq:";

/// Comment used in place of a review when a file has no patch.
pub const NO_FILE_PATCH: &str =
    "I can't analyze this file because there are no diffs in it. \
     It's likely a binary file or similar.";

/// Feedback used when the pull request body is empty.
pub const NO_PR_DESCRIPTION: &str =
    "No PR description provided. Please provide a description of the changes in this PR.";

/// Rendered in place of a commit evaluation the reasoning service never gave.
pub const NO_EVALUATION: &str = "No evaluation provided.";
