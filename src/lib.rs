//! Library root for `homework-bot`.
//!
//! Homework-bot is a Telegram notification service for Practicum homework
//! reviews designed to:
//! - Poll the homework-status API on a fixed interval
//! - Turn review status changes into human-readable chat messages
//! - Report failures to the same chat, each distinct failure only once
//!
//! The bot integrates with the Practicum review API over plain HTTP and with
//! Telegram for chat. The architecture is built around extensible traits that
//! allow for different implementations of each service.

#[deny(missing_docs)]
pub mod base;
pub mod poll;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the homework-bot runtime:
/// - Creates the runtime context with review and chat clients
/// - Starts the main poll loop
pub async fn start(config: Config) -> Void {
    info!("Starting homework-bot ...");

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config)?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
