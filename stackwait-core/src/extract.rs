//! Extraction of asserted values from terminal payloads
//!
//! Once a poll completes, callers assert on the status the payload
//! recorded. These helpers pull that value out, keeping a wrong recorded
//! status ([`PollError::StatusMismatch`]) distinct from "it never
//! finished" so failure messages say which one happened.

use serde_json::Value;

use crate::error::PollError;
use crate::predicate::find_record;

/// The status a task recorded when it finished (e.g. "SUCCESS")
pub fn task_status(payload: &Value) -> Result<&str, PollError> {
    string_field(payload, "status")
}

/// The status a job file transfer recorded, from either payload shape
pub fn transfer_status(payload: &Value) -> Result<&str, PollError> {
    let subject = match payload.get("results").and_then(Value::as_array) {
        Some(results) => results.first().ok_or_else(|| PollError::MissingField {
            field: "results".to_string(),
        })?,
        None => payload,
    };
    string_field(subject, "transfer_status")
}

/// The record in `payload["results"]` whose `id_field` equals `id`
pub fn record<'a>(payload: &'a Value, id_field: &str, id: &Value) -> Result<&'a Value, PollError> {
    find_record(payload, id_field, id)
}

/// A named property of the record matched by `id_field == id`
pub fn record_property<'a>(
    payload: &'a Value,
    id_field: &str,
    id: &Value,
    property: &str,
) -> Result<&'a Value, PollError> {
    find_record(payload, id_field, id)?
        .get(property)
        .ok_or_else(|| PollError::MissingField {
            field: property.to_string(),
        })
}

/// Check the recorded status against the expected literal
pub fn expect_status(actual: &str, expected: &str) -> Result<(), PollError> {
    if actual == expected {
        Ok(())
    } else {
        Err(PollError::StatusMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

fn string_field<'a>(payload: &'a Value, field: &str) -> Result<&'a str, PollError> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| PollError::MissingField {
            field: field.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_status() {
        let payload = json!({"finished": true, "status": "SUCCESS"});
        assert_eq!(task_status(&payload).unwrap(), "SUCCESS");
    }

    #[test]
    fn test_task_status_missing() {
        let err = task_status(&json!({"finished": true})).unwrap_err();
        assert!(matches!(err, PollError::MissingField { field } if field == "status"));
    }

    #[test]
    fn test_transfer_status_single_shape() {
        let payload = json!({
            "transfer_datetime": "2024-01-01T00:00:00Z",
            "transfer_status": "SUCCESS"
        });
        assert_eq!(transfer_status(&payload).unwrap(), "SUCCESS");
    }

    #[test]
    fn test_transfer_status_listing_shape() {
        let payload = json!({"results": [{
            "transfer_datetime": "2024-01-01T00:00:00Z",
            "transfer_status": "FAILURE"
        }]});
        assert_eq!(transfer_status(&payload).unwrap(), "FAILURE");
    }

    #[test]
    fn test_record_property() {
        let payload = json!({"results": [
            {"id": 3, "started": false},
            {"id": 7, "started": true},
        ]});
        let value = record_property(&payload, "id", &json!(7), "started").unwrap();
        assert_eq!(value, &json!(true));
    }

    #[test]
    fn test_record_not_found() {
        let payload = json!({"results": [{"id": 3}]});
        let err = record_property(&payload, "id", &json!(7), "started").unwrap_err();
        assert!(matches!(err, PollError::RecordNotFound { .. }));
    }

    #[test]
    fn test_expect_status() {
        assert!(expect_status("SUCCESS", "SUCCESS").is_ok());

        let err = expect_status("FAILURE", "SUCCESS").unwrap_err();
        assert!(err.is_mismatch());
    }
}
