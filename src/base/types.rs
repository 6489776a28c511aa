//! Common types and result handling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::base::verdicts;

/// Crate-wide error type for the startup and delivery boundaries.
pub type Err = anyhow::Error;
/// Crate-wide result type.
pub type Res<T> = Result<T, Err>;
/// Crate-wide result type for operations with no return value.
pub type Void = Res<()>;

/// Review lifecycle states the API may report for a homework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    /// The reviewer accepted the homework.
    Approved,
    /// A reviewer picked the homework up.
    Reviewing,
    /// The reviewer returned the homework with remarks.
    Rejected,
}

impl HomeworkStatus {
    /// Parse the wire representation of a status.
    ///
    /// Returns `None` for anything outside the fixed set; the caller decides
    /// how to classify that.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// The chat-facing verdict text for this status.
    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Approved => verdicts::APPROVED,
            Self::Reviewing => verdicts::REVIEWING,
            Self::Rejected => verdicts::REJECTED,
        }
    }
}

/// Classified failure of a single poll cycle.
///
/// Every error the poll chain can produce is one of these variants; the loop
/// boundary matches on them instead of catching a blanket error type.
#[derive(Debug, Error)]
pub enum PollError {
    /// The HTTP request itself failed (DNS, refused connection, timeout).
    #[error("review API is unreachable: {0}")]
    ApiUnreachable(#[source] reqwest::Error),
    /// The API answered, but not with 200 OK.
    #[error("review API answered with HTTP {0}")]
    ApiStatus(reqwest::StatusCode),
    /// The API answered 200, but the body is not valid JSON.
    #[error("review API returned an unreadable body: {0}")]
    MalformedBody(#[source] reqwest::Error),
    /// The response envelope is not a JSON object.
    #[error("review API response is not a JSON object")]
    EnvelopeNotAnObject,
    /// The envelope lacks a required key.
    #[error("review API response has no \"{0}\" key")]
    MissingKey(&'static str),
    /// The value under the homeworks key is not a list.
    #[error("\"homeworks\" in the review API response is not a list")]
    HomeworksNotAList,
    /// A homework record lacks a required key.
    #[error("homework record has no \"{0}\" key")]
    RecordMissingKey(&'static str),
    /// The reported status is outside the known set.
    #[error("unknown homework status \"{0}\"")]
    UnknownStatus(String),
}

/// Coarse classification of a [`PollError`], used at the loop boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollErrorKind {
    /// The API could not be reached or answered out of contract.
    Transport,
    /// The API answered, but the payload shape is wrong.
    Validation,
}

impl PollError {
    /// Classify this error as a transport or validation failure.
    pub fn kind(&self) -> PollErrorKind {
        match self {
            Self::ApiUnreachable(_) | Self::ApiStatus(_) | Self::MalformedBody(_) => PollErrorKind::Transport,
            Self::EnvelopeNotAnObject | Self::MissingKey(_) | Self::HomeworksNotAList | Self::RecordMissingKey(_) | Self::UnknownStatus(_) => {
                PollErrorKind::Validation
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_fixed_status_set() {
        assert_eq!(HomeworkStatus::parse("approved"), Some(HomeworkStatus::Approved));
        assert_eq!(HomeworkStatus::parse("reviewing"), Some(HomeworkStatus::Reviewing));
        assert_eq!(HomeworkStatus::parse("rejected"), Some(HomeworkStatus::Rejected));
        assert_eq!(HomeworkStatus::parse("graded"), None);
        assert_eq!(HomeworkStatus::parse("Approved"), None);
    }

    #[test]
    fn transport_errors_are_distinct_from_validation_errors() {
        let transport = PollError::ApiStatus(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        let validation = PollError::MissingKey("homeworks");

        assert_eq!(transport.kind(), PollErrorKind::Transport);
        assert_eq!(validation.kind(), PollErrorKind::Validation);
    }

    #[test]
    fn unknown_status_carries_the_offending_text() {
        let err = PollError::UnknownStatus("graded".to_string());
        assert_eq!(err.to_string(), "unknown homework status \"graded\"");
        assert_eq!(err.kind(), PollErrorKind::Validation);
    }
}
