//! Shape validation and message formatting for review API responses.
//!
//! The review API hands back loosely structured JSON. This module pins the
//! envelope down to the one homework record the bot cares about and turns it
//! into the chat-facing sentence. Every deviation from the expected shape maps
//! to a distinct [`PollError`] variant.

use serde_json::Value;

use crate::base::types::{HomeworkStatus, PollError};

/// Key under which the API lists homework records.
const HOMEWORKS_KEY: &str = "homeworks";

/// Key carrying the next poll cursor.
const CURRENT_DATE_KEY: &str = "current_date";

/// Key carrying the homework name inside a record.
const NAME_KEY: &str = "homework_name";

/// Key carrying the review status inside a record.
const STATUS_KEY: &str = "status";

/// Pull the opportunistic poll cursor out of the envelope, if present.
///
/// A missing or non-integer `current_date` is not an error; the caller keeps
/// its previous cursor.
pub fn extract_cursor(envelope: &Value) -> Option<u64> {
    envelope.get(CURRENT_DATE_KEY).and_then(Value::as_u64)
}

/// Validate the envelope shape and return the most recent homework record.
///
/// An empty `homeworks` list means nothing has been submitted for review yet
/// and yields `None`.
pub fn first_homework(envelope: &Value) -> Result<Option<&Value>, PollError> {
    let map = envelope.as_object().ok_or(PollError::EnvelopeNotAnObject)?;

    let homeworks = map.get(HOMEWORKS_KEY).ok_or(PollError::MissingKey(HOMEWORKS_KEY))?;
    let homeworks = homeworks.as_array().ok_or(PollError::HomeworksNotAList)?;

    Ok(homeworks.first())
}

/// Compose the chat-facing status-change sentence for a homework record.
pub fn compose_status_message(homework: &Value) -> Result<String, PollError> {
    let name = homework.get(NAME_KEY).ok_or(PollError::RecordMissingKey(NAME_KEY))?;
    let name = name.as_str().ok_or(PollError::RecordMissingKey(NAME_KEY))?;

    let raw_status = homework.get(STATUS_KEY).ok_or(PollError::RecordMissingKey(STATUS_KEY))?;
    let raw_status = raw_status.as_str().ok_or_else(|| PollError::UnknownStatus(raw_status.to_string()))?;

    let status = HomeworkStatus::parse(raw_status).ok_or_else(|| PollError::UnknownStatus(raw_status.to_string()))?;

    Ok(format!("Изменился статус проверки работы \"{}\". {}", name, status.verdict()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn rejects_an_envelope_that_is_not_an_object() {
        let envelope = json!(["homeworks"]);
        assert!(matches!(first_homework(&envelope), Err(PollError::EnvelopeNotAnObject)));
    }

    #[test]
    fn rejects_an_envelope_without_the_homeworks_key() {
        let envelope = json!({ "current_date": 1000 });
        assert!(matches!(first_homework(&envelope), Err(PollError::MissingKey("homeworks"))));
    }

    #[test]
    fn rejects_homeworks_that_are_not_a_list() {
        let envelope = json!({ "homeworks": "first one" });
        assert!(matches!(first_homework(&envelope), Err(PollError::HomeworksNotAList)));
    }

    #[test]
    fn an_empty_homeworks_list_is_not_an_error() {
        let envelope = json!({ "homeworks": [], "current_date": 1000 });
        assert!(matches!(first_homework(&envelope), Ok(None)));
    }

    #[test]
    fn returns_the_first_homework_record() {
        let envelope = json!({
            "homeworks": [
                { "homework_name": "newest", "status": "reviewing" },
                { "homework_name": "older", "status": "approved" },
            ],
        });

        let homework = first_homework(&envelope).unwrap().unwrap();
        assert_eq!(homework["homework_name"], "newest");
    }

    #[test]
    fn extracts_the_cursor_when_present() {
        let envelope = json!({ "homeworks": [], "current_date": 1000 });
        assert_eq!(extract_cursor(&envelope), Some(1000));
    }

    #[test]
    fn ignores_a_missing_or_malformed_cursor() {
        assert_eq!(extract_cursor(&json!({ "homeworks": [] })), None);
        assert_eq!(extract_cursor(&json!({ "homeworks": [], "current_date": "soon" })), None);
    }

    #[test]
    fn formats_an_approved_homework() {
        let homework = json!({ "homework_name": "X", "status": "approved" });

        assert_eq!(
            compose_status_message(&homework).unwrap(),
            "Изменился статус проверки работы \"X\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn formats_a_homework_under_review() {
        let homework = json!({ "homework_name": "X", "status": "reviewing" });

        assert_eq!(
            compose_status_message(&homework).unwrap(),
            "Изменился статус проверки работы \"X\". Работа взята на проверку ревьюером."
        );
    }

    #[test]
    fn rejects_a_record_without_a_name() {
        let homework = json!({ "status": "approved" });
        assert!(matches!(compose_status_message(&homework), Err(PollError::RecordMissingKey("homework_name"))));
    }

    #[test]
    fn rejects_a_record_without_a_status() {
        let homework = json!({ "homework_name": "X" });
        assert!(matches!(compose_status_message(&homework), Err(PollError::RecordMissingKey("status"))));
    }

    #[test]
    fn rejects_an_unknown_status() {
        let homework = json!({ "homework_name": "X", "status": "graded" });

        match compose_status_message(&homework) {
            Err(PollError::UnknownStatus(status)) => assert_eq!(status, "graded"),
            other => panic!("expected an unknown-status error, got {:?}", other),
        }
    }
}
