//! Review context threaded into every prompt.

/// Context assembled once per run and shared read-only by every
/// prompt builder.
#[derive(Debug, Clone, Default)]
pub struct ReviewContext {
    /// The pull request body.
    pub pr_description: String,
    /// Free text from the repository guidance file, empty when absent.
    pub repository_guidance: String,
    /// Text of the triggering user comment, empty for PR-opened runs.
    pub user_reply_context: String,
}
