//! ReasoningProvider trait and the response normalizer.
//!
//! This is the one chokepoint where untrusted external output enters
//! the system. Providers may fail in any number of ways; the normalizer
//! converts all of them into an empty JSON object so the pipeline never
//! has to handle a provider error anywhere else.

pub mod openai;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use openai::AssistantProvider;

/// Errors from the reasoning provider.
///
/// Variants carry the correlating thread id where one exists so degraded
/// runs can be traced in the provider dashboard.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("reasoning API error{}: {message}", thread_suffix(.thread))]
    Api {
        thread: Option<String>,
        message: String,
    },

    #[error("run ended without completing{}: status {status}", thread_suffix(.thread))]
    Incomplete {
        thread: Option<String>,
        status: String,
    },

    #[error("reply has no text content{}", thread_suffix(.thread))]
    EmptyReply { thread: Option<String> },

    #[error("failed to parse reply as JSON{}: {message}", thread_suffix(.thread))]
    Parse {
        thread: Option<String>,
        message: String,
    },
}

fn thread_suffix(thread: &Option<String>) -> String {
    match thread {
        Some(id) => format!(" (thread {id})"),
        None => String::new(),
    }
}

/// Trait for structured-completion calls to the reasoning service.
///
/// Implementations submit one prompt with a "respond as JSON"
/// constraint and return the parsed reply.
#[async_trait]
pub trait ReasoningProvider: Send + Sync {
    /// Submit a prompt and return the reply parsed as JSON.
    async fn complete_json(&self, prompt: &str) -> Result<Value, ProviderError>;
}

/// Response normalizer: call the provider and never fail.
///
/// Any error is logged with its correlating thread id and degraded to
/// an empty JSON object. Callers must treat every field of the result
/// as optional.
pub async fn json_response(provider: &dyn ReasoningProvider, prompt: &str) -> Value {
    match provider.complete_json(prompt).await {
        Ok(value) => value,
        Err(err) => {
            eprintln!("Warning: reasoning call degraded to empty result: {err}");
            Value::Object(serde_json::Map::new())
        }
    }
}
