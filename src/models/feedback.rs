//! Feedback types making up the review aggregate.
//!
//! Wire field names (camelCase, `type`/`desc`/`eval` abbreviations) match
//! what the reviewer assistant is instructed to emit, so the same types
//! deserialize its replies and serialize the raw-JSON audit block.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of issue categories a reviewer may flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum IssueCategory {
    Style,
    Structure,
    Quality,
    Security,
    Testing,
    Documentation,
    Performance,
    Maintainability,
    Readability,
    Design,
    #[default]
    Other,
}

/// Custom deserializer for IssueCategory that tolerates LLM variation.
///
/// Categories arrive as free text from the reasoning service; anything
/// not in the closed set maps to `Other` rather than failing.
impl<'de> Deserialize<'de> for IssueCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.to_lowercase().as_str() {
            "style" => IssueCategory::Style,
            "structure" => IssueCategory::Structure,
            "quality" => IssueCategory::Quality,
            "security" => IssueCategory::Security,
            "testing" => IssueCategory::Testing,
            "documentation" => IssueCategory::Documentation,
            "performance" => IssueCategory::Performance,
            "maintainability" => IssueCategory::Maintainability,
            "readability" => IssueCategory::Readability,
            "design" => IssueCategory::Design,
            _ => IssueCategory::Other,
        })
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IssueCategory::Style => "Style",
            IssueCategory::Structure => "Structure",
            IssueCategory::Quality => "Quality",
            IssueCategory::Security => "Security",
            IssueCategory::Testing => "Testing",
            IssueCategory::Documentation => "Documentation",
            IssueCategory::Performance => "Performance",
            IssueCategory::Maintainability => "Maintainability",
            IssueCategory::Readability => "Readability",
            IssueCategory::Design => "Design",
            IssueCategory::Other => "Other",
        };
        write!(f, "{name}")
    }
}

/// Severity of a flagged issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

/// Custom deserializer for Severity that accepts common LLM variations.
///
/// Reviewers sometimes answer "critical", "minor", "moderate" and so on
/// instead of the requested Low/Medium/High. Unrecognised values fall
/// back to `Medium` rather than failing the whole issue.
impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.to_lowercase().as_str() {
            "low" | "minor" | "trivial" | "info" | "note" => Severity::Low,
            "medium" | "moderate" | "warning" => Severity::Medium,
            "high" | "critical" | "severe" | "major" | "blocker" => Severity::High,
            _ => Severity::Medium,
        })
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "Low"),
            Severity::Medium => write!(f, "Medium"),
            Severity::High => write!(f, "High"),
        }
    }
}

/// Commit-level grade assigned by the reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Evaluation {
    Excellent,
    VeryGood,
    Acceptable,
    NeedsImprovement,
    Unacceptable,
}

impl Evaluation {
    /// Parse an evaluation from untrusted reply text.
    ///
    /// Unknown values yield `None`, which renders as the fixed
    /// no-evaluation fallback.
    pub fn parse_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "excellent" => Some(Evaluation::Excellent),
            "verygood" | "very good" => Some(Evaluation::VeryGood),
            "acceptable" => Some(Evaluation::Acceptable),
            "needsimprovement" | "needs improvement" => Some(Evaluation::NeedsImprovement),
            "unacceptable" => Some(Evaluation::Unacceptable),
            _ => None,
        }
    }
}

/// One flagged concern within a file diff.
///
/// Every field defaults because the whole struct is decoded from an
/// adversarial reply; a missing field must never sink the issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type", default)]
    pub category: IssueCategory,
    #[serde(default)]
    pub severity: Severity,
    #[serde(rename = "desc", default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(rename = "suggestedCodeReplacement", default)]
    pub suggested_replacement: String,
}

/// Review results for a single changed file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileFeedback {
    pub path: String,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub comments: String,
}

/// Review results for a single commit, files in API order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitFeedback {
    pub hash: String,
    pub commit_message: String,
    #[serde(default)]
    pub files: Vec<FileFeedback>,
    #[serde(default)]
    pub evaluation: Option<Evaluation>,
    #[serde(default)]
    pub commit_message_comments: String,
}

/// Root aggregate for one review run, commits in API order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestFeedback {
    #[serde(default)]
    pub commits: Vec<CommitFeedback>,
    #[serde(default)]
    pub pr_message_feedback: String,
    #[serde(default)]
    pub response_context: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_deserialize_known() {
        let c: IssueCategory = serde_json::from_str("\"Security\"").unwrap();
        assert_eq!(c, IssueCategory::Security);
    }

    #[test]
    fn category_deserialize_case_insensitive() {
        let c: IssueCategory = serde_json::from_str("\"readability\"").unwrap();
        assert_eq!(c, IssueCategory::Readability);
    }

    #[test]
    fn category_deserialize_unknown_falls_back_to_other() {
        let c: IssueCategory = serde_json::from_str("\"Correctness\"").unwrap();
        assert_eq!(c, IssueCategory::Other);
    }

    #[test]
    fn severity_deserialize_variations() {
        let high: Severity = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(high, Severity::High);
        let low: Severity = serde_json::from_str("\"minor\"").unwrap();
        assert_eq!(low, Severity::Low);
        let fallback: Severity = serde_json::from_str("\"sideways\"").unwrap();
        assert_eq!(fallback, Severity::Medium);
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
    }

    #[test]
    fn evaluation_parse_loose() {
        assert_eq!(
            Evaluation::parse_loose("VeryGood"),
            Some(Evaluation::VeryGood)
        );
        assert_eq!(
            Evaluation::parse_loose("needs improvement"),
            Some(Evaluation::NeedsImprovement)
        );
        assert_eq!(Evaluation::parse_loose("meh"), None);
    }

    #[test]
    fn issue_deserializes_with_all_fields_missing() {
        let issue: Issue = serde_json::from_str("{}").unwrap();
        assert_eq!(issue.category, IssueCategory::Other);
        assert_eq!(issue.severity, Severity::Medium);
        assert!(issue.description.is_empty());
        assert!(issue.line.is_none());
        assert!(issue.suggestions.is_empty());
    }

    #[test]
    fn issue_wire_field_names() {
        let json = r#"{
            "type": "Security",
            "severity": "High",
            "desc": "SQL injection",
            "line": 42,
            "snippet": "query(input)",
            "suggestions": ["Use parameterized queries."],
            "suggestedCodeReplacement": "query_with_params(input)"
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.category, IssueCategory::Security);
        assert_eq!(issue.severity, Severity::High);
        assert_eq!(issue.line, Some(42));
        assert_eq!(issue.suggestions.len(), 1);

        let back = serde_json::to_value(&issue).unwrap();
        assert_eq!(back["type"], "Security");
        assert_eq!(back["desc"], "SQL injection");
        assert_eq!(back["suggestedCodeReplacement"], "query_with_params(input)");
    }

    #[test]
    fn aggregate_serde_roundtrip() {
        let feedback = PullRequestFeedback {
            commits: vec![CommitFeedback {
                hash: "abc123".into(),
                commit_message: "Fix parser".into(),
                files: vec![FileFeedback {
                    path: "src/parser.rs".into(),
                    issues: vec![Issue::default()],
                    comments: "Looks fine.".into(),
                }],
                evaluation: Some(Evaluation::Acceptable),
                commit_message_comments: String::new(),
            }],
            pr_message_feedback: "Good description.".into(),
            response_context: String::new(),
        };
        let json = serde_json::to_string_pretty(&feedback).unwrap();
        assert!(json.contains("\"commitMessage\": \"Fix parser\""));
        let back: PullRequestFeedback = serde_json::from_str(&json).unwrap();
        assert_eq!(back.commits.len(), 1);
        assert_eq!(back.commits[0].evaluation, Some(Evaluation::Acceptable));
        assert_eq!(back.commits[0].files[0].path, "src/parser.rs");
    }
}
