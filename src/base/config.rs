//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc, time::Duration};

use serde::Deserialize;

use super::types::Res;

/// Default review API endpoint.
fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

/// Default Telegram Bot API base URL.
fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

/// Default number of seconds between poll cycles.
fn default_poll_period_seconds() -> u64 {
    600
}

/// Default outbound HTTP request timeout in seconds.
fn default_http_timeout_seconds() -> u64 {
    30
}

/// Configuration for the homework-bot application.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Shared inner configuration.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// The configuration values themselves.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// Review API token (`PRACTICUM_TOKEN`).
    pub practicum_token: String,
    /// Telegram bot token (`TELEGRAM_TOKEN`).
    pub telegram_token: String,
    /// Telegram chat that receives the notifications (`TELEGRAM_CHAT_ID`).
    pub telegram_chat_id: String,
    /// Review API endpoint (`ENDPOINT`).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Telegram Bot API base URL (`TELEGRAM_API_BASE`).
    #[serde(default = "default_telegram_api_base")]
    pub telegram_api_base: String,
    /// Seconds between poll cycles (`POLL_PERIOD_SECONDS`).
    #[serde(default = "default_poll_period_seconds")]
    pub poll_period_seconds: u64,
    /// Outbound HTTP request timeout in seconds (`HTTP_TIMEOUT_SECONDS`).
    #[serde(default = "default_http_timeout_seconds")]
    pub http_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from the environment and an optional TOML file.
    ///
    /// Fails if any of the required values (tokens, chat id) is missing or
    /// empty; this is the only fatal error path in the application.
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default());

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        result.validate()?;

        Ok(result)
    }

    /// Check the invariants the rest of the application relies on.
    pub fn validate(&self) -> Res<()> {
        if self.practicum_token.is_empty() {
            return Err(anyhow::anyhow!("PRACTICUM_TOKEN must be set."));
        }

        if self.telegram_token.is_empty() {
            return Err(anyhow::anyhow!("TELEGRAM_TOKEN must be set."));
        }

        if self.telegram_chat_id.is_empty() {
            return Err(anyhow::anyhow!("TELEGRAM_CHAT_ID must be set."));
        }

        if self.poll_period_seconds == 0 {
            return Err(anyhow::anyhow!("Poll period must be at least one second."));
        }

        if self.http_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("HTTP timeout must be at least one second."));
        }

        Ok(())
    }

    /// The pause between poll cycles.
    pub fn poll_period(&self) -> Duration {
        Duration::from_secs(self.poll_period_seconds)
    }

    /// The outbound HTTP request timeout.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }
}
