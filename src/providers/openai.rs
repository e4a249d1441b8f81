//! OpenAI Assistants implementation of [`ReasoningProvider`].
//!
//! The reviewer persona lives in a pre-configured assistant; each call
//! creates a thread with the prompt, starts a run with a JSON response
//! format, polls until the run reaches a terminal status, and reads the
//! newest message on the thread.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::sleep;

use super::{ProviderError, ReasoningProvider};

const API_BASE: &str = "https://api.openai.com/v1";

/// Run statuses that mean the run is still in flight.
const PENDING_STATUSES: &[&str] = &["queued", "in_progress", "cancelling"];

/// Assistants-API-backed reasoning provider.
pub struct AssistantProvider {
    http: reqwest::Client,
    api_key: String,
    assistant_id: String,
    poll_interval: Duration,
}

impl AssistantProvider {
    pub fn new(api_key: String, assistant_id: String, poll_interval: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            assistant_id,
            poll_interval,
        }
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("OpenAI-Beta", "assistants=v2")
    }

    /// Send a request and decode the JSON body, tagging errors with the
    /// thread id when one is already known.
    async fn send_json(
        &self,
        builder: reqwest::RequestBuilder,
        thread: Option<&str>,
    ) -> Result<Value, ProviderError> {
        let thread_id = || thread.map(str::to_string);
        let response = builder.send().await.map_err(|e| ProviderError::Api {
            thread: thread_id(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                thread: thread_id(),
                message: format!("HTTP {status}: {body}"),
            });
        }

        response.json::<Value>().await.map_err(|e| ProviderError::Api {
            thread: thread_id(),
            message: format!("invalid response body: {e}"),
        })
    }

    /// Create a thread seeded with the prompt and start a run on it.
    async fn create_run(&self, prompt: &str) -> Result<(String, String), ProviderError> {
        let body = serde_json::json!({
            "assistant_id": self.assistant_id,
            "thread": {
                "messages": [{ "role": "user", "content": prompt }],
            },
            "response_format": { "type": "json_object" },
        });
        let url = format!("{API_BASE}/threads/runs");
        let run = self
            .send_json(
                self.request(reqwest::Method::POST, &url).json(&body),
                None,
            )
            .await?;

        let thread_id = run["thread_id"]
            .as_str()
            .ok_or_else(|| ProviderError::Api {
                thread: None,
                message: "run response has no thread_id".into(),
            })?
            .to_string();
        let run_id = run["id"]
            .as_str()
            .ok_or_else(|| ProviderError::Api {
                thread: Some(thread_id.clone()),
                message: "run response has no id".into(),
            })?
            .to_string();
        Ok((thread_id, run_id))
    }

    /// Poll the run until it leaves the pending statuses.
    async fn await_run(&self, thread_id: &str, run_id: &str) -> Result<String, ProviderError> {
        let url = format!("{API_BASE}/threads/{thread_id}/runs/{run_id}");
        loop {
            let run = self
                .send_json(self.request(reqwest::Method::GET, &url), Some(thread_id))
                .await?;
            let status = run["status"].as_str().unwrap_or("unknown").to_string();
            if !PENDING_STATUSES.contains(&status.as_str()) {
                return Ok(status);
            }
            sleep(self.poll_interval).await;
        }
    }

    /// Read the newest message on the thread and return its text value.
    async fn latest_reply(&self, thread_id: &str) -> Result<String, ProviderError> {
        let url = format!("{API_BASE}/threads/{thread_id}/messages?order=desc&limit=1");
        let messages = self
            .send_json(self.request(reqwest::Method::GET, &url), Some(thread_id))
            .await?;

        let text = messages["data"][0]["content"]
            .as_array()
            .and_then(|parts| {
                parts
                    .iter()
                    .find(|part| part["type"] == "text")
                    .and_then(|part| part["text"]["value"].as_str())
            })
            .map(str::to_string);

        text.ok_or(ProviderError::EmptyReply {
            thread: Some(thread_id.to_string()),
        })
    }
}

#[async_trait]
impl ReasoningProvider for AssistantProvider {
    async fn complete_json(&self, prompt: &str) -> Result<Value, ProviderError> {
        let (thread_id, run_id) = self.create_run(prompt).await?;
        let status = self.await_run(&thread_id, &run_id).await?;
        if status != "completed" {
            return Err(ProviderError::Incomplete {
                thread: Some(thread_id),
                status,
            });
        }

        let reply = self.latest_reply(&thread_id).await?;
        serde_json::from_str(&reply).map_err(|e| ProviderError::Parse {
            thread: Some(thread_id),
            message: e.to_string(),
        })
    }
}
