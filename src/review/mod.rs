//! Review pipeline: trigger resolution, unit processors, and the
//! fan-out/fan-in aggregator.
//!
//! Each review unit (file, commit, PR description) builds a prompt,
//! runs it through the response normalizer, and shapes the untrusted
//! reply into a typed feedback record. Reasoning failures degrade to
//! neutral records; only PR resolution and the final comment post are
//! fatal.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tokio::task::JoinSet;

use crate::constants;
use crate::github::{ChangedFile, CommitRef, GithubError, PullRequest, RepoHost, RepoId};
use crate::models::event::{ACTION_CREATED, ACTION_OPENED};
use crate::models::{
    CommitFeedback, Evaluation, FileFeedback, Issue, PullRequestFeedback, ReviewContext,
    TriggerEvent,
};
use crate::providers::{json_response, ReasoningProvider};
use crate::{prompt, report};

/// Errors that abort the run.
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("no pull request could be resolved from the trigger event")]
    NoPullRequest,

    #[error("repository API error: {0}")]
    Github(#[from] GithubError),
}

// ── Trigger resolution ──────────────────────────────────────────────

/// Whether a comment summons the bot.
///
/// Deliberate substring heuristic: it can false-positive when the
/// marker appears in quoted code and false-negative when reworded.
pub fn has_summon_marker(text: &str) -> bool {
    text.contains(constants::SUMMON_MARKER)
}

/// Whether a comment was authored by the bot itself. Guards against
/// replying to our own reports forever.
pub fn has_author_marker(text: &str) -> bool {
    text.contains(constants::AUTHOR_MARKER)
}

/// Resolve the target pull request and response context from the
/// trigger event.
///
/// A comment event is in scope only when it summons the bot and was
/// not written by the bot; the PR is then fetched by the issue number.
/// A PR-opened event carries the PR inline. Anything else is an error.
pub async fn resolve_pull_request(
    event: &TriggerEvent,
    repo: &RepoId,
    host: &dyn RepoHost,
) -> Result<(PullRequest, String), ReviewError> {
    if event.action == ACTION_CREATED {
        if let (Some(issue), Some(comment)) = (&event.issue, &event.comment) {
            if has_summon_marker(&comment.body) && !has_author_marker(&comment.body) {
                let pr = host.get_pull_request(repo, issue.number).await?;
                return Ok((pr, comment.body.clone()));
            }
        }
    } else if event.action == ACTION_OPENED {
        if let Some(pr) = &event.pull_request {
            return Ok((
                PullRequest {
                    number: pr.number,
                    body: pr.body.clone(),
                },
                String::new(),
            ));
        }
    }
    Err(ReviewError::NoPullRequest)
}

// ── Untrusted reply extraction ──────────────────────────────────────

/// Read a string field from an untrusted reply, empty when absent or
/// not a string.
fn string_field(reply: &Value, key: &str) -> String {
    reply
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Read the `issues` field from an untrusted reply.
///
/// A missing or non-list value yields no issues; list elements that
/// fail to decode are skipped individually.
fn issues_field(reply: &Value) -> Vec<Issue> {
    match reply.get("issues").and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(|item| serde_json::from_value::<Issue>(item.clone()).ok())
            .collect(),
        None => Vec::new(),
    }
}

/// Read the `eval` field from an untrusted commit reply.
fn evaluation_field(reply: &Value) -> Option<Evaluation> {
    reply
        .get("eval")
        .and_then(Value::as_str)
        .and_then(Evaluation::parse_loose)
}

// ── Unit processors ─────────────────────────────────────────────────

/// Review one changed file.
///
/// Files without a patch never hit the reasoning service; they get the
/// fixed no-diff comment instead.
pub async fn process_file(
    file: &ChangedFile,
    provider: &dyn ReasoningProvider,
    context: &ReviewContext,
) -> FileFeedback {
    match file.patch.as_deref().filter(|patch| !patch.is_empty()) {
        Some(patch) => {
            let prompt = prompt::file_prompt(&file.filename, context, Some(patch));
            let reply = json_response(provider, &prompt).await;
            FileFeedback {
                path: file.filename.clone(),
                issues: issues_field(&reply),
                comments: string_field(&reply, "comments"),
            }
        }
        None => FileFeedback {
            path: file.filename.clone(),
            issues: Vec::new(),
            comments: constants::NO_FILE_PATCH.to_string(),
        },
    }
}

/// Review one commit: its files concurrently, then the commit itself.
///
/// Never fails; a file-list fetch error reviews as zero files so the
/// commit still appears in the report.
pub async fn process_commit(
    commit: CommitRef,
    repo: RepoId,
    host: Arc<dyn RepoHost>,
    provider: Arc<dyn ReasoningProvider>,
    context: Arc<ReviewContext>,
) -> CommitFeedback {
    let files = match host.get_commit_files(&repo, &commit.sha).await {
        Ok(files) => files,
        Err(err) => {
            eprintln!(
                "Warning: could not list files for commit {}: {err}",
                commit.sha
            );
            Vec::new()
        }
    };

    // Fan out file reviews; results land at their input index so the
    // report order matches the API order regardless of completion order.
    let mut file_feedback: Vec<FileFeedback> = files
        .iter()
        .map(|file| FileFeedback {
            path: file.filename.clone(),
            ..FileFeedback::default()
        })
        .collect();

    let mut join_set = JoinSet::new();
    for (index, file) in files.into_iter().enumerate() {
        let provider = Arc::clone(&provider);
        let context = Arc::clone(&context);
        join_set.spawn(async move {
            let feedback = process_file(&file, provider.as_ref(), &context).await;
            (index, feedback)
        });
    }
    while let Some(result) = join_set.join_next().await {
        match result {
            Ok((index, feedback)) => file_feedback[index] = feedback,
            Err(err) => eprintln!("Warning: file review task panicked: {err}"),
        }
    }

    let prompt = prompt::commit_prompt(&file_feedback, &commit.message, &context);
    let reply = json_response(provider.as_ref(), &prompt).await;

    CommitFeedback {
        hash: commit.sha,
        commit_message: commit.message,
        files: file_feedback,
        evaluation: evaluation_field(&reply),
        commit_message_comments: string_field(&reply, "commitMessageComments"),
    }
}

/// Review the PR description.
///
/// Empty or whitespace-only descriptions get the fixed message without
/// a reasoning call.
pub async fn process_pr_description(
    description: &str,
    provider: &dyn ReasoningProvider,
) -> String {
    if description.trim().is_empty() {
        return constants::NO_PR_DESCRIPTION.to_string();
    }
    let reply = json_response(provider, &prompt::pr_description_prompt(description)).await;
    string_field(&reply, "value")
}

// ── Aggregator ──────────────────────────────────────────────────────

/// Run the full review pipeline for one trigger event.
///
/// Resolves the target PR, assembles the review context, fans out over
/// commits and files, renders the report, and posts it. Returns the
/// posted report text.
pub async fn process_pull_request(
    event: &TriggerEvent,
    host: Arc<dyn RepoHost>,
    provider: Arc<dyn ReasoningProvider>,
) -> Result<String, ReviewError> {
    let repo = RepoId {
        owner: event.repository.owner.login.clone(),
        name: event.repository.name.clone(),
    };

    let (pull_request, response_context) =
        resolve_pull_request(event, &repo, host.as_ref()).await?;

    // Best-effort guidance read; absence is the common case.
    let repository_guidance = match host.read_file(&repo, constants::GUIDANCE_FILENAME).await {
        Ok(content) => content,
        Err(_) => {
            println!(
                "No {} file found in the repository",
                constants::GUIDANCE_FILENAME
            );
            String::new()
        }
    };

    let pr_description = pull_request.body.clone().unwrap_or_default();
    let context = Arc::new(ReviewContext {
        pr_description: pr_description.clone(),
        repository_guidance,
        user_reply_context: response_context.clone(),
    });

    // The description review runs concurrently with the commit fetch
    // and the whole commit fan-out.
    let description_task = {
        let provider = Arc::clone(&provider);
        tokio::spawn(async move {
            process_pr_description(&pr_description, provider.as_ref()).await
        })
    };

    let commits = host.list_commits(&repo, pull_request.number).await?;

    // Placeholders keep the tree complete even if a task panics.
    let mut commit_feedback: Vec<CommitFeedback> = commits
        .iter()
        .map(|commit| CommitFeedback {
            hash: commit.sha.clone(),
            commit_message: commit.message.clone(),
            files: Vec::new(),
            evaluation: None,
            commit_message_comments: String::new(),
        })
        .collect();

    let mut join_set = JoinSet::new();
    for (index, commit) in commits.into_iter().enumerate() {
        let repo = repo.clone();
        let host = Arc::clone(&host);
        let provider = Arc::clone(&provider);
        let context = Arc::clone(&context);
        join_set.spawn(async move {
            let feedback = process_commit(commit, repo, host, provider, context).await;
            (index, feedback)
        });
    }
    while let Some(result) = join_set.join_next().await {
        match result {
            Ok((index, feedback)) => commit_feedback[index] = feedback,
            Err(err) => eprintln!("Warning: commit review task panicked: {err}"),
        }
    }

    let pr_message_feedback = match description_task.await {
        Ok(feedback) => feedback,
        Err(err) => {
            eprintln!("Warning: description review task panicked: {err}");
            String::new()
        }
    };

    let feedback = PullRequestFeedback {
        commits: commit_feedback,
        pr_message_feedback,
        response_context,
    };

    println!(
        "Result: {}",
        serde_json::to_string(&feedback).unwrap_or_default()
    );

    let body = report::render(&feedback);
    host.post_comment(&repo, pull_request.number, &body).await?;

    Ok(body)
}
