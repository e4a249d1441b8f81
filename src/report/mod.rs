//! Report renderer: the feedback aggregate as a markdown comment.
//!
//! Pure and deterministic; all I/O happened before this point. The
//! renderer is the dual of the response normalizer: whatever gaps the
//! degraded upstream data has, the output is always well-formed.

use crate::constants;
use crate::models::{CommitFeedback, Evaluation, FileFeedback, Issue, PullRequestFeedback};

/// Human-readable label for a commit evaluation.
///
/// Single fixed table so the mapping is testable on its own.
pub fn evaluation_label(evaluation: Evaluation) -> &'static str {
    match evaluation {
        Evaluation::Excellent => "🏆 Excellent",
        Evaluation::VeryGood => "👍 Very Good",
        Evaluation::Acceptable => "🔄 Acceptable",
        Evaluation::NeedsImprovement => "⚠️ Needs Improvement",
        Evaluation::Unacceptable => "❌ Unacceptable",
    }
}

/// Render the complete comment body for a review run.
///
/// Prefixes the author marker (so comment events can recognize the
/// bot's own output) and appends the raw aggregate for auditability.
pub fn render(feedback: &PullRequestFeedback) -> String {
    let raw_json = serde_json::to_string_pretty(feedback).unwrap_or_else(|_| "{}".to_string());
    format!(
        "_{}_ \n\n\n\n{}\n\n<hr>\n\n<details>\n\
         \t<summary>Raw JSON</summary>\n\n\
         ```json\n{raw_json}\n```\n\n</details>",
        constants::AUTHOR_MARKER,
        render_feedback(feedback),
    )
}

/// Render the feedback body without the marker and audit wrapping.
fn render_feedback(feedback: &PullRequestFeedback) -> String {
    let mut markdown = String::new();

    if !feedback.response_context.is_empty() {
        markdown.push_str(&format!(
            "<blockquote>{}</blockquote>\n\n",
            feedback.response_context
        ));
    }

    markdown.push_str(&format!("{}\n\n", feedback.pr_message_feedback));

    for commit in &feedback.commits {
        render_commit(&mut markdown, commit);
    }

    markdown
}

fn render_commit(markdown: &mut String, commit: &CommitFeedback) {
    markdown.push_str(&format!(
        "\n<hr style=\"border:4px solid gray\">\n\n## Commit {}\n\n",
        commit.hash
    ));
    markdown.push_str(&format!(
        "<blockquote>{}</blockquote>\n\n",
        commit.commit_message
    ));
    if !commit.commit_message_comments.trim().is_empty() {
        markdown.push_str(&format!("{}\n\n\n", commit.commit_message_comments));
    }

    for file in &commit.files {
        render_file(markdown, file);
    }

    match commit.evaluation {
        Some(evaluation) => {
            markdown.push_str(&format!(
                "**Evaluation:** {}\n\n",
                evaluation_label(evaluation)
            ));
        }
        None => {
            markdown.push_str(&format!("**Evaluation:** {}\n\n", constants::NO_EVALUATION));
        }
    }
}

fn render_file(markdown: &mut String, file: &FileFeedback) {
    markdown.push_str(&format!("\n<hr>\n\n### File: `{}`\n", file.path));
    if !file.comments.trim().is_empty() {
        markdown.push_str(&format!("{}\n\n\n", file.comments));
    }

    for (index, issue) in file.issues.iter().enumerate() {
        render_issue(markdown, index, issue);
    }
}

fn render_issue(markdown: &mut String, index: usize, issue: &Issue) {
    markdown.push_str("\n\n<hr>\n\n");
    markdown.push_str(&format!(
        "#### Problem {} ({})\n",
        index + 1,
        issue.category
    ));
    markdown.push_str(&format!("**Severity:** {}\n", issue.severity));
    markdown.push_str(&format!("**Description:** {}\n", issue.description));
    if let Some(line) = issue.line {
        markdown.push_str(&format!("**Line:** {line}\n"));
    }
    if !issue.snippet.trim().is_empty() {
        markdown.push_str(&format!("**Snippet:**\n```\n{}\n```\n", issue.snippet));
    }
    if !issue.suggestions.is_empty() {
        markdown.push_str("**Suggestions:**\n");
        for suggestion in &issue.suggestions {
            markdown.push_str(&format!("- {suggestion}\n"));
        }
    }
    if !issue.suggested_replacement.trim().is_empty() {
        markdown.push_str(&format!(
            "\n\n**Suggested Code Replacement:**\n```\n{}\n```\n",
            issue.suggested_replacement
        ));
    }
    markdown.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IssueCategory, Severity};

    fn issue() -> Issue {
        Issue {
            category: IssueCategory::Security,
            severity: Severity::High,
            description: "User input flows into the query unescaped.".into(),
            line: Some(42),
            snippet: "query(input)".into(),
            suggestions: vec!["Use parameterized queries.".into()],
            suggested_replacement: "query_with_params(input)".into(),
        }
    }

    fn feedback() -> PullRequestFeedback {
        PullRequestFeedback {
            commits: vec![CommitFeedback {
                hash: "abc123".into(),
                commit_message: "Add query endpoint".into(),
                files: vec![
                    FileFeedback {
                        path: "src/db.rs".into(),
                        issues: vec![issue()],
                        comments: "One serious problem here.".into(),
                    },
                    FileFeedback {
                        path: "assets/logo.png".into(),
                        issues: vec![],
                        comments: crate::constants::NO_FILE_PATCH.into(),
                    },
                ],
                evaluation: Some(Evaluation::NeedsImprovement),
                commit_message_comments: "Message is fine.".into(),
            }],
            pr_message_feedback: "Thanks for the description.".into(),
            response_context: String::new(),
        }
    }

    #[test]
    fn label_table_covers_all_evaluations() {
        assert_eq!(evaluation_label(Evaluation::Excellent), "🏆 Excellent");
        assert_eq!(evaluation_label(Evaluation::VeryGood), "👍 Very Good");
        assert_eq!(evaluation_label(Evaluation::Acceptable), "🔄 Acceptable");
        assert_eq!(
            evaluation_label(Evaluation::NeedsImprovement),
            "⚠️ Needs Improvement"
        );
        assert_eq!(evaluation_label(Evaluation::Unacceptable), "❌ Unacceptable");
    }

    #[test]
    fn render_starts_with_author_marker() {
        let output = render(&feedback());
        assert!(output.starts_with(&format!("_{}_", crate::constants::AUTHOR_MARKER)));
    }

    #[test]
    fn render_full_example() {
        let output = render(&feedback());
        assert!(output.contains("## Commit abc123"));
        assert!(output.contains("<blockquote>Add query endpoint</blockquote>"));
        assert!(output.contains("### File: `src/db.rs`"));
        assert!(output.contains("#### Problem 1 (Security)"));
        assert!(output.contains("**Severity:** High"));
        assert!(output.contains("**Line:** 42"));
        assert!(output.contains("- Use parameterized queries."));
        assert!(output.contains("**Suggested Code Replacement:**"));
        assert!(output.contains("### File: `assets/logo.png`"));
        assert!(output.contains(crate::constants::NO_FILE_PATCH));
        assert!(output.contains("**Evaluation:** ⚠️ Needs Improvement"));
        assert!(output.contains("<summary>Raw JSON</summary>"));
    }

    #[test]
    fn render_quotes_response_context_first() {
        let mut fb = feedback();
        fb.response_context = "critiq take another look".into();
        let output = render(&fb);
        let quote = output
            .find("<blockquote>critiq take another look</blockquote>")
            .unwrap();
        let commit = output.find("## Commit").unwrap();
        assert!(quote < commit);
    }

    #[test]
    fn render_no_evaluation_fallback() {
        let mut fb = feedback();
        fb.commits[0].evaluation = None;
        let output = render(&fb);
        assert!(output.contains(&format!(
            "**Evaluation:** {}",
            crate::constants::NO_EVALUATION
        )));
    }

    #[test]
    fn render_omits_empty_optional_blocks() {
        let mut fb = feedback();
        fb.commits[0].files[0].issues = vec![Issue {
            category: IssueCategory::Style,
            severity: Severity::Low,
            description: "Inconsistent naming.".into(),
            line: None,
            snippet: String::new(),
            suggestions: vec![],
            suggested_replacement: String::new(),
        }];
        let output = render(&fb);
        assert!(output.contains("#### Problem 1 (Style)"));
        assert!(!output.contains("**Line:**"));
        assert!(!output.contains("**Snippet:**"));
        assert!(!output.contains("**Suggestions:**"));
        assert!(!output.contains("**Suggested Code Replacement:**"));
    }

    #[test]
    fn render_is_deterministic() {
        let fb = feedback();
        assert_eq!(render(&fb), render(&fb));
    }

    #[test]
    fn render_handles_default_aggregate() {
        let output = render(&PullRequestFeedback::default());
        assert!(output.contains("Raw JSON"));
        assert!(!output.contains("## Commit"));
    }
}
