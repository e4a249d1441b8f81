//! critiq — LLM-backed pull request review bot.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation; fatal errors exit non-zero so the
//! action run is marked failed.

use std::fs;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};

use critiq::config::Config;
use critiq::constants;
use critiq::env::Env;
use critiq::github::GithubClient;
use critiq::models::event::{ACTION_CREATED, ACTION_OPENED};
use critiq::models::TriggerEvent;
use critiq::providers::AssistantProvider;
use critiq::review;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = Config::load(&Env::real())?;

    println!("{}: {}", constants::ENV_EVENT_PATH, config.event_path);
    let raw_event = fs::read_to_string(&config.event_path)
        .with_context(|| format!("failed to read event payload at {}", config.event_path))?;
    println!("Event: {raw_event}");

    let event: TriggerEvent =
        serde_json::from_str(&raw_event).context("failed to parse event payload")?;

    // Events for other actions (synchronize, edited, ...) are delivered
    // by broad workflow filters; they are not ours to handle.
    if event.action != ACTION_OPENED && event.action != ACTION_CREATED {
        return Ok(());
    }

    let host = Arc::new(GithubClient::new(config.github_token.clone()));
    let provider = Arc::new(AssistantProvider::new(
        config.openai_api_key.clone(),
        config.assistant_id.clone(),
        config.poll_interval,
    ));

    review::process_pull_request(&event, host, provider)
        .await
        .context("review run failed")?;

    Ok(())
}
