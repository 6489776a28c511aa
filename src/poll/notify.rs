//! Outbound notification delivery with one-shot error reporting.
//!
//! Status-change messages are best effort: a delivery failure is logged and
//! the loop moves on. Error reports go to chat at most once per distinct
//! message text; recurring identical errors stay visible in the log stream
//! only.

use std::collections::HashSet;

use tracing::{debug, error, instrument};

use crate::service::chat::ChatClient;

/// Notification dispatcher owned by the poll loop.
///
/// Holds the set of error texts already reported to chat. The set grows for
/// the lifetime of the process and is never pruned.
pub struct Notifier {
    chat: ChatClient,
    chat_id: String,
    reported_errors: HashSet<String>,
}

impl Notifier {
    /// Create a new notifier delivering to the given chat.
    pub fn new(chat: ChatClient, chat_id: impl Into<String>) -> Self {
        Self {
            chat,
            chat_id: chat_id.into(),
            reported_errors: HashSet::new(),
        }
    }

    /// Deliver a status-change message, best effort.
    #[instrument(skip_all)]
    pub async fn notify_status(&self, text: &str) {
        match self.chat.send_message(&self.chat_id, text).await {
            Ok(()) => debug!("Sent status message: \"{}\"", text),
            Err(err) => error!("Failed to send status message: {}", err),
        }
    }

    /// Report an error, attempting chat delivery only for texts not seen before.
    ///
    /// The text is recorded on the first attempt whether or not delivery
    /// succeeds; every occurrence is logged regardless.
    #[instrument(skip_all)]
    pub async fn notify_error(&mut self, text: &str) {
        error!("{}", text);

        if !self.reported_errors.insert(text.to_string()) {
            return;
        }

        if let Err(err) = self.chat.send_message(&self.chat_id, text).await {
            error!("Failed to send error report: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use mockall::mock;

    use crate::base::types::Void;
    use crate::service::chat::GenericChatClient;

    use super::*;

    mock! {
        pub Chat {}

        #[async_trait]
        impl GenericChatClient for Chat {
            async fn send_message(&self, chat_id: &str, text: &str) -> Void;
        }
    }

    #[tokio::test]
    async fn delivers_a_repeated_error_text_only_once() {
        let mut mock = MockChat::new();
        mock.expect_send_message()
            .withf(|chat_id, text| chat_id == "424242" && text == "something broke")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut notifier = Notifier::new(ChatClient::new(Arc::new(mock)), "424242");

        notifier.notify_error("something broke").await;
        notifier.notify_error("something broke").await;
    }

    #[tokio::test]
    async fn delivers_distinct_error_texts_separately() {
        let mut mock = MockChat::new();
        mock.expect_send_message().times(2).returning(|_, _| Ok(()));

        let mut notifier = Notifier::new(ChatClient::new(Arc::new(mock)), "424242");

        notifier.notify_error("first failure").await;
        notifier.notify_error("second failure").await;
    }

    #[tokio::test]
    async fn a_failed_error_delivery_is_not_retried() {
        let mut mock = MockChat::new();
        mock.expect_send_message()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("chat is down")));

        let mut notifier = Notifier::new(ChatClient::new(Arc::new(mock)), "424242");

        notifier.notify_error("something broke").await;
        notifier.notify_error("something broke").await;
    }

    #[tokio::test]
    async fn a_failed_status_delivery_is_swallowed() {
        let mut mock = MockChat::new();
        mock.expect_send_message()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("chat is down")));

        let notifier = Notifier::new(ChatClient::new(Arc::new(mock)), "424242");

        // Must not panic or propagate the failure.
        notifier.notify_status("all good").await;
    }
}
