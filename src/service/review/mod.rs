pub mod practicum;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;

use crate::base::types::PollError;

// Traits.

/// Generic review-status trait that clients must implement.
///
/// This trait defines the core functionality for fetching homework review
/// statuses. Implementing this trait allows different review services to be
/// used with the homework-bot.
#[async_trait]
pub trait GenericReviewClient: Send + Sync + 'static {
    /// Fetch the raw status envelope for homeworks updated after `from_date`.
    ///
    /// Returns the response body as parsed JSON; the caller is responsible for
    /// shape validation. Network failures and out-of-contract responses are
    /// classified as transport errors. No retries happen here; retrying is the
    /// poll loop's job.
    async fn homework_statuses(&self, from_date: u64) -> Result<Value, PollError>;
}

// Structs.

/// Review client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ReviewClient {
    inner: Arc<dyn GenericReviewClient>,
}

impl Deref for ReviewClient {
    type Target = dyn GenericReviewClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ReviewClient {
    pub fn new(inner: Arc<dyn GenericReviewClient>) -> Self {
        Self { inner }
    }
}
