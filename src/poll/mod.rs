//! The poll cycle for homework-bot.
//!
//! This module provides the pieces a single poll cycle is made of:
//! - Validating the review API envelope and formatting status messages
//! - Delivering notifications with one-shot error reporting

pub mod notify;
pub mod status;
