//! Renderer properties over full aggregates.
//!
//! The renderer is a pure function of its input; these tests pin the
//! section ordering, the defensive handling of degraded data, and the
//! audit-block round-trip.

use pretty_assertions::assert_eq;

use critiq::constants;
use critiq::models::{
    CommitFeedback, Evaluation, FileFeedback, Issue, IssueCategory, PullRequestFeedback, Severity,
};
use critiq::report;

fn sample_feedback() -> PullRequestFeedback {
    PullRequestFeedback {
        commits: vec![
            CommitFeedback {
                hash: "1111111".into(),
                commit_message: "Add parser".into(),
                files: vec![FileFeedback {
                    path: "src/parser.rs".into(),
                    issues: vec![Issue {
                        category: IssueCategory::Performance,
                        severity: Severity::Medium,
                        description: "Quadratic scan over the input.".into(),
                        line: Some(88),
                        snippet: "for a in xs { for b in xs { .. } }".into(),
                        suggestions: vec![
                            "Index the input first.".into(),
                            "Use a HashSet for membership checks.".into(),
                        ],
                        suggested_replacement: String::new(),
                    }],
                    comments: "Works, but watch the complexity.".into(),
                }],
                evaluation: Some(Evaluation::VeryGood),
                commit_message_comments: String::new(),
            },
            CommitFeedback {
                hash: "2222222".into(),
                commit_message: "wip".into(),
                files: vec![],
                evaluation: None,
                commit_message_comments: "Commit message is not descriptive.".into(),
            },
        ],
        pr_message_feedback: "Hello! The description covers the changes well.".into(),
        response_context: "critiq re-check the loop please".into(),
    }
}

/// Extract the fenced raw-JSON audit block from a rendered report.
fn extract_raw_json(report: &str) -> &str {
    let start = report.find("```json\n").unwrap() + "```json\n".len();
    let end = report[start..].find("\n```").unwrap() + start;
    &report[start..end]
}

#[test]
fn sections_appear_in_report_order() {
    let output = report::render(&sample_feedback());

    let marker = output.find(constants::AUTHOR_MARKER).unwrap();
    let quote = output.find("<blockquote>critiq re-check").unwrap();
    let description = output.find("covers the changes well").unwrap();
    let commit_one = output.find("## Commit 1111111").unwrap();
    let file = output.find("### File: `src/parser.rs`").unwrap();
    let problem = output.find("#### Problem 1 (Performance)").unwrap();
    let evaluation = output.find("**Evaluation:** 👍 Very Good").unwrap();
    let commit_two = output.find("## Commit 2222222").unwrap();
    let raw = output.find("<summary>Raw JSON</summary>").unwrap();

    assert!(marker < quote);
    assert!(quote < description);
    assert!(description < commit_one);
    assert!(commit_one < file);
    assert!(file < problem);
    assert!(problem < evaluation);
    assert!(evaluation < commit_two);
    assert!(commit_two < raw);
}

#[test]
fn suggestions_render_as_itemized_list() {
    let output = report::render(&sample_feedback());
    assert!(output.contains("- Index the input first.\n- Use a HashSet for membership checks.\n"));
}

#[test]
fn commit_without_files_still_renders_evaluation_fallback() {
    let output = report::render(&sample_feedback());
    let commit_two = output.find("## Commit 2222222").unwrap();
    assert!(output[commit_two..].contains("Commit message is not descriptive."));
    assert!(output[commit_two..].contains(&format!("**Evaluation:** {}", constants::NO_EVALUATION)));
}

#[test]
fn audit_block_round_trips_byte_identically() {
    let first = report::render(&sample_feedback());

    let raw = extract_raw_json(&first);
    let reparsed: PullRequestFeedback = serde_json::from_str(raw).unwrap();
    let second = report::render(&reparsed);

    assert_eq!(first, second);
}

#[test]
fn audit_block_round_trips_for_degraded_aggregate() {
    // A run where every reasoning call failed: neutral fields everywhere.
    let degraded = PullRequestFeedback {
        commits: vec![CommitFeedback {
            hash: "deadbee".into(),
            commit_message: "Change".into(),
            files: vec![FileFeedback {
                path: "a.rs".into(),
                issues: vec![],
                comments: String::new(),
            }],
            evaluation: None,
            commit_message_comments: String::new(),
        }],
        pr_message_feedback: String::new(),
        response_context: String::new(),
    };

    let first = report::render(&degraded);
    let reparsed: PullRequestFeedback = serde_json::from_str(extract_raw_json(&first)).unwrap();
    assert_eq!(first, report::render(&reparsed));
}
