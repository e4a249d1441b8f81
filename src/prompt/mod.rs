//! Prompt builders for each review unit.
//!
//! Pure functions: given domain context they produce the instruction
//! text plus the JSON shape the reply must conform to. All delimiting
//! and shape declarations live here so the processors stay free of
//! prompt wording.

use crate::models::{FileFeedback, ReviewContext};

/// Per-filename guidance injected into file prompts.
///
/// Some files mislead a reviewer that only sees their diff; this table
/// adds the clarification up front.
fn special_guidance(filename: &str) -> Option<&'static str> {
    match filename {
        ".gitignore" => Some(
            "Keep in mind this is the .gitignore file. What you see here is what is \
             ignored by git, not what is included in version control. Just because \
             something is listed here it doesn't mean it was ever added to version control.",
        ),
        _ => None,
    }
}

/// Shared trailing context: PR description, user reply, and repository
/// guidance, each clearly delimited so the reviewer can tell
/// instructions from reviewed content from history.
fn push_context_sections(prompt: &mut String, context: &ReviewContext, subject: &str) {
    prompt.push_str(&format!(
        "\n## Pull Request Description (context)\n\n\
         Check whether the changes in this {subject} are reflected in the PR \
         description and are relevant to achieving the PR's goal:\n\n{}\n",
        context.pr_description
    ));

    if !context.user_reply_context.is_empty() {
        prompt.push_str(&format!(
            "\n## User Reply (context)\n\n\
             This extra content was passed by a user, perhaps replying to a \
             previous evaluation you made:\n\n{}\n",
            context.user_reply_context
        ));
    }

    if !context.repository_guidance.is_empty() {
        prompt.push_str(&format!(
            "\n## Repository Guidance (context)\n\n{}\n",
            context.repository_guidance
        ));
    }
}

/// Build the prompt for reviewing one file's diff.
///
/// With no patch the prompt states that there is nothing to analyze;
/// processors normally short-circuit that case before calling the
/// reasoning service at all.
pub fn file_prompt(filename: &str, context: &ReviewContext, patch: Option<&str>) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!(
        "## Instructions\n\n\
         Analyze the diff to `{filename}` and enumerate all issues with it. \
         Return a JSON object with:\n\
         - \"issues\": an array of issue objects, each with:\n\
         - \"type\": MUST be exactly one of \"Style\", \"Structure\", \"Quality\", \
         \"Security\", \"Testing\", \"Documentation\", \"Performance\", \
         \"Maintainability\", \"Readability\", \"Design\", \"Other\"\n\
         - \"severity\": MUST be exactly one of \"Low\", \"Medium\", \"High\"\n\
         - \"desc\": description of the issue\n\
         - \"line\": (optional) line number in the new file\n\
         - \"snippet\": (optional) the offending code\n\
         - \"suggestions\": array of suggested improvements\n\
         - \"suggestedCodeReplacement\": (optional) replacement code\n\
         - \"comments\": a string where you give feedback to the user, telling \
         them what they did wrong and/or praising them.\n\n\
         If there are no issues, return an empty \"issues\" array.\n"
    ));

    if let Some(guidance) = special_guidance(filename) {
        prompt.push_str(&format!("\n{guidance}\n"));
    }

    push_context_sections(&mut prompt, context, "file");

    match patch {
        Some(patch) => prompt.push_str(&format!(
            "\n--- START OF DIFF (GIVE FEEDBACK ON THIS) ---\n\
             {patch}\n\
             --- END OF DIFF ---\n"
        )),
        None => prompt.push_str(
            "\nThere are no diffs in this file, so there are no issues to find.\n",
        ),
    }

    prompt
}

/// Build the prompt for evaluating one commit.
///
/// The per-file feedback already gathered for the commit is embedded as
/// pretty JSON so the evaluation considers every flagged issue.
pub fn commit_prompt(
    files: &[FileFeedback],
    commit_message: &str,
    context: &ReviewContext,
) -> String {
    let files_json =
        serde_json::to_string_pretty(files).unwrap_or_else(|_| "[]".to_string());

    let mut prompt = format!(
        "## Instructions\n\n\
         Keeping in mind all the issues found in the files of this commit, \
         evaluate the commit. Return a JSON object with:\n\
         - \"eval\": MUST be exactly one of \"Excellent\", \"VeryGood\", \
         \"Acceptable\", \"NeedsImprovement\", \"Unacceptable\"\n\
         - \"commitMessageComments\": in case the user doesn't submit relevant \
         commit titles and/or descriptions, this is where you should call them \
         out on it.\n\
         \n## File Analysis\n\n\
         Here is the analysis of the files in this commit:\n\n{files_json}\n\
         \n## Commit Message\n\n\
         Keep in mind commit messages should be succinct and descriptive, and \
         should try to be under 50 characters. Don't be harsh on commit messages \
         unless they are majorly deficient.\n\n{commit_message}\n"
    );

    push_context_sections(&mut prompt, context, "commit");

    prompt
}

/// Build the prompt for critiquing the PR description.
pub fn pr_description_prompt(description: &str) -> String {
    format!(
        "## Instructions\n\n\
         Greet the user, then give feedback on their pull request body, making \
         it clear you're talking about the pull request's description. Return a \
         JSON object with:\n\
         - \"value\": your feedback text\n\
         \n## Pull Request Description\n\n{description}\n"
    )
}
