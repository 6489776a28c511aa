//! Review status integration for homework-bot.
//!
//! This module provides functionality for fetching homework statuses from the
//! Practicum review API:
//! - One authorized GET per poll cycle against the statuses endpoint
//! - Uniform classification of network and HTTP-status failures
//!
//! It implements the `GenericReviewClient` trait defined in the parent module.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{StatusCode, header::AUTHORIZATION};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::base::{
    config::Config,
    types::{PollError, Res},
};

use super::{GenericReviewClient, ReviewClient};

// Extra methods on `ReviewClient` applied by the practicum implementation.

impl ReviewClient {
    /// Creates a new Practicum review client.
    pub fn practicum(config: &Config) -> Res<Self> {
        let client = PracticumReviewClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

impl From<PracticumReviewClient> for ReviewClient {
    fn from(client: PracticumReviewClient) -> Self {
        Self { inner: Arc::new(client) }
    }
}

// Structs.

/// Practicum client implementation.
#[derive(Clone)]
pub struct PracticumReviewClient {
    endpoint: String,
    authorization: String,
    client: reqwest::Client,
}

impl PracticumReviewClient {
    /// Create a new Practicum review client.
    #[instrument(name = "PracticumReviewClient::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        let client = reqwest::Client::builder().timeout(config.http_timeout()).build()?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            authorization: format!("OAuth {}", config.practicum_token),
            client,
        })
    }
}

#[async_trait]
impl GenericReviewClient for PracticumReviewClient {
    #[instrument(skip(self))]
    async fn homework_statuses(&self, from_date: u64) -> Result<Value, PollError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, self.authorization.as_str())
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(PollError::ApiUnreachable)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(PollError::ApiStatus(status));
        }

        let envelope = response.json::<Value>().await.map_err(PollError::MalformedBody)?;

        debug!("Fetched homework statuses from {}", self.endpoint);

        Ok(envelope)
    }
}
