//! critiq — LLM-backed pull request review bot (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod config;
pub mod constants;
pub mod env;
pub mod github;
pub mod models;
pub mod prompt;
pub mod providers;
pub mod report;
pub mod review;
