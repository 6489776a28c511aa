//! Chat service integration for homework-bot.
//!
//! This module provides functionality for delivering notifications through the
//! Telegram Bot API:
//! - One `sendMessage` call per outbound notification
//! - Delivery confirmation via the Bot API `ok` flag
//!
//! It implements the `GenericChatClient` trait defined in the parent module.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::base::{
    config::Config,
    types::{Res, Void},
};

use super::{ChatClient, GenericChatClient};

// Extra methods on `ChatClient` applied by the telegram implementation.

impl ChatClient {
    /// Creates a new Telegram chat client.
    pub fn telegram(config: &Config) -> Res<Self> {
        let client = TelegramChatClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

impl From<TelegramChatClient> for ChatClient {
    fn from(client: TelegramChatClient) -> Self {
        Self { inner: Arc::new(client) }
    }
}

// Structs.

/// Subset of the Bot API response needed to confirm delivery.
#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    description: Option<String>,
}

/// Telegram client implementation.
#[derive(Clone)]
pub struct TelegramChatClient {
    send_message_url: String,
    client: reqwest::Client,
}

impl TelegramChatClient {
    /// Create a new Telegram chat client.
    #[instrument(name = "TelegramChatClient::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        let send_message_url = format!(
            "{}/bot{}/sendMessage",
            config.telegram_api_base.trim_end_matches('/'),
            config.telegram_token
        );

        let client = reqwest::Client::builder().timeout(config.http_timeout()).build()?;

        Ok(Self { send_message_url, client })
    }
}

#[async_trait]
impl GenericChatClient for TelegramChatClient {
    #[instrument(skip(self, text))]
    async fn send_message(&self, chat_id: &str, text: &str) -> Void {
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });

        let response = self
            .client
            .post(&self.send_message_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send message: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Telegram API returned {}: {}", status, body));
        }

        let confirmation: SendMessageResponse = response.json().await?;
        if !confirmation.ok {
            return Err(anyhow::anyhow!(
                "Telegram rejected the message: {}",
                confirmation.description.unwrap_or_default()
            ));
        }

        debug!("Delivered message to chat {}", chat_id);

        Ok(())
    }
}
