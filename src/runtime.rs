//! Runtime services and shared state for the homework-bot.

use tracing::{debug, info, instrument, warn};

use crate::{
    base::{
        config::Config,
        types::{PollError, PollErrorKind, Res, Void},
    },
    poll::{notify::Notifier, status},
    service::{chat::ChatClient, review::ReviewClient},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the review client, chat client, and configuration.
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The review API client instance.
    pub review: ReviewClient,
    /// The chat client instance.
    pub chat: ChatClient,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Res<Self> {
        // Initialize the review API client.
        let review = ReviewClient::practicum(&config)?;

        // Initialize the chat client.
        let chat = ChatClient::telegram(&config)?;

        Ok(Self { config, review, chat })
    }

    /// Run the poll loop until the process is stopped.
    ///
    /// Sleeps a fixed period after every cycle, successful or not. The only
    /// exits are Ctrl-C and external termination; cycle failures are reported
    /// through the notifier and the loop keeps going.
    pub async fn start(&self) -> Void {
        let mut notifier = Notifier::new(self.chat.clone(), self.config.telegram_chat_id.clone());
        let mut cursor = 0u64;

        info!("Entering poll loop with a period of {}s", self.config.poll_period_seconds);

        loop {
            self.run_cycle(&mut cursor, &mut notifier).await;

            tokio::select! {
                _ = tokio::time::sleep(self.config.poll_period()) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Received Ctrl-C, shutting down");
                    return Ok(());
                }
            }
        }
    }

    /// Run one cycle and route any failure through the error notifier.
    ///
    /// This is the loop boundary: every error the poll chain can produce is
    /// classified here, logged, and reported to chat at most once per distinct
    /// text.
    #[instrument(skip_all)]
    pub async fn run_cycle(&self, cursor: &mut u64, notifier: &mut Notifier) {
        if let Err(err) = self.poll_once(cursor, notifier).await {
            match err.kind() {
                PollErrorKind::Transport => warn!("Poll cycle could not reach the review API"),
                PollErrorKind::Validation => warn!("Poll cycle got a malformed review API response"),
            }

            let report = format!("Сбой в работе программы: {}", err);
            notifier.notify_error(&report).await;
        }
    }

    /// Execute one poll cycle: fetch, validate, format, notify.
    ///
    /// The cursor is advanced as soon as the envelope carries a `current_date`,
    /// even if the same envelope later fails validation.
    #[instrument(skip_all)]
    pub async fn poll_once(&self, cursor: &mut u64, notifier: &Notifier) -> Result<(), PollError> {
        let envelope = self.review.homework_statuses(*cursor).await?;

        if let Some(next) = status::extract_cursor(&envelope) {
            *cursor = next;
        }

        let Some(homework) = status::first_homework(&envelope)? else {
            debug!("No homework submitted for review yet");
            return Ok(());
        };

        let message = status::compose_status_message(homework)?;
        notifier.notify_status(&message).await;

        Ok(())
    }
}
