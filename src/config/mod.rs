//! Run configuration resolved from the action runner environment.
//!
//! The bot has no config file and no CLI surface: everything it needs is
//! handed to it by the workflow as environment variables. The only
//! repository-side configuration is the guidance file, which is fetched
//! over the API at review time rather than read from disk.

use std::time::Duration;

use thiserror::Error;

use crate::constants;
use crate::env::Env;

/// Errors during config resolution.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}

/// Everything a single review run needs from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the webhook event payload file.
    pub event_path: String,
    /// GitHub API token (the workflow's installation token).
    pub github_token: String,
    /// OpenAI API key.
    pub openai_api_key: String,
    /// Identifier of the pre-configured reviewer assistant.
    pub assistant_id: String,
    /// Interval between run-status polls.
    pub poll_interval: Duration,
}

impl Config {
    /// Resolve the configuration from the environment.
    pub fn load(env: &Env) -> Result<Self, ConfigError> {
        let poll_interval = match env.var(constants::ENV_POLL_INTERVAL) {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidVar {
                    name: constants::ENV_POLL_INTERVAL,
                    value: raw,
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(constants::DEFAULT_POLL_INTERVAL_SECS),
        };

        Ok(Self {
            event_path: require(env, constants::ENV_EVENT_PATH)?,
            github_token: require(env, constants::ENV_GITHUB_TOKEN)?,
            openai_api_key: require(env, constants::ENV_OPENAI_API_KEY)?,
            assistant_id: require(env, constants::ENV_ASSISTANT_ID)?,
            poll_interval,
        })
    }
}

fn require(env: &Env, name: &'static str) -> Result<String, ConfigError> {
    env.var(name).map_err(|_| ConfigError::MissingVar(name))
}
