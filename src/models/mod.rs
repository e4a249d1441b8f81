//! Shared types used across all modules.
//!
//! This module defines the core data structures for the feedback
//! aggregate, the review context, and the trigger events. Other modules
//! import from here rather than reaching into each other's internals.

pub mod context;
pub mod event;
pub mod feedback;

pub use context::ReviewContext;
pub use event::TriggerEvent;
pub use feedback::{
    CommitFeedback, Evaluation, FileFeedback, Issue, IssueCategory, PullRequestFeedback, Severity,
};
