use std::time::Duration;

use anyhow::{ensure, Context, Result};

use crate::intelligence::pipeline::PipelineSettings;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on one completion call, retries included.
    pub gateway_timeout_secs: u64,
    /// Global per-field cap on sanitized user context.
    pub context_max_chars: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            gateway_timeout_secs: std::env::var("GATEWAY_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse::<u64>()
                .context("GATEWAY_TIMEOUT_SECS must be a whole number of seconds")?,
            context_max_chars: std::env::var("CONTEXT_MAX_CHARS")
                .unwrap_or_else(|_| "4000".to_string())
                .parse::<usize>()
                .context("CONTEXT_MAX_CHARS must be a positive integer")?,
        };

        ensure!(config.gateway_timeout_secs > 0, "GATEWAY_TIMEOUT_SECS must be greater than 0");
        ensure!(config.context_max_chars > 0, "CONTEXT_MAX_CHARS must be greater than 0");
        Ok(config)
    }

    pub fn gateway_timeout(&self) -> Duration {
        Duration::from_secs(self.gateway_timeout_secs)
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            gateway_timeout: self.gateway_timeout(),
            context_max_chars: self.context_max_chars,
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            anthropic_api_key: "test-key".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            gateway_timeout_secs: 5,
            context_max_chars: 4000,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
