//! Completion predicates
//!
//! A predicate decides whether a status payload represents a terminal
//! state. The stack's endpoint families signal completion in three
//! different ways, so the rules are a tagged strategy rather than a
//! switch at each call site. Each predicate also carries an explicit
//! policy for absent fields: the task and transfer endpoints omit
//! fields while an operation is still starting up (absence means "not
//! yet"), whereas a job request that cannot be found in the listing is
//! a hard failure.

use serde_json::Value;

use crate::error::PollError;

/// How a payload is recognized as terminal
#[derive(Debug, Clone)]
enum CompletionRule {
    /// Terminal when `payload[field]` is truthy
    FlagIsTrue { field: String },
    /// Terminal when `field` is present and non-empty; supports both the
    /// single-resource shape and the paged listing shape (`results[0]`)
    FieldPresent { field: String },
    /// Terminal when the record in `payload["results"]` whose `id_field`
    /// equals `id` has `property == expected`
    RecordProperty {
        id_field: String,
        id: Value,
        property: String,
        expected: Value,
    },
}

/// A completion decision over a status payload
#[derive(Debug, Clone)]
pub struct CompletionPredicate {
    rule: CompletionRule,
    missing_field_is_incomplete: bool,
}

impl CompletionPredicate {
    /// Terminal when the payload's `finished` flag is set.
    ///
    /// Matches the task status endpoint, which reports `started`,
    /// `finished`, `status` and `messages`. A payload without the flag is
    /// treated as not yet complete.
    pub fn task_finished() -> Self {
        Self::flag_is_true("finished")
    }

    /// Terminal when the named boolean flag is truthy
    pub fn flag_is_true(field: impl Into<String>) -> Self {
        Self {
            rule: CompletionRule::FlagIsTrue {
                field: field.into(),
            },
            missing_field_is_incomplete: true,
        }
    }

    /// Terminal when `transfer_datetime` has been recorded.
    ///
    /// Matches the job file transfer endpoint in both its shapes: a single
    /// transfer resource, or a paged listing whose first result is the
    /// transfer.
    pub fn transfer_complete() -> Self {
        Self::field_present("transfer_datetime")
    }

    /// Terminal when the named field is present and non-empty
    pub fn field_present(field: impl Into<String>) -> Self {
        Self {
            rule: CompletionRule::FieldPresent {
                field: field.into(),
            },
            missing_field_is_incomplete: true,
        }
    }

    /// Terminal when the job request with the given id has
    /// `property == expected` in the job request listing.
    ///
    /// A listing without the record is a hard failure, never a retry.
    pub fn job_request_property(
        job_request_id: i64,
        property: impl Into<String>,
        expected: Value,
    ) -> Self {
        Self::record_property("id", Value::from(job_request_id), property, expected)
    }

    /// Terminal when the record matched by `id_field == id` has
    /// `property == expected`
    pub fn record_property(
        id_field: impl Into<String>,
        id: Value,
        property: impl Into<String>,
        expected: Value,
    ) -> Self {
        Self {
            rule: CompletionRule::RecordProperty {
                id_field: id_field.into(),
                id,
                property: property.into(),
                expected,
            },
            missing_field_is_incomplete: false,
        }
    }

    /// Override the absent-field policy
    pub fn with_missing_field_incomplete(mut self, tolerate: bool) -> Self {
        self.missing_field_is_incomplete = tolerate;
        self
    }

    /// Decide whether the payload is terminal.
    ///
    /// `Ok(false)` means "poll again"; an error means the payload shape
    /// rules out ever completing and the poll must fail hard.
    pub fn is_complete(&self, payload: &Value) -> Result<bool, PollError> {
        match &self.rule {
            CompletionRule::FlagIsTrue { field } => match payload.get(field) {
                Some(value) => Ok(is_truthy(value)),
                None => self.absent(field),
            },
            CompletionRule::FieldPresent { field } => {
                let subject = match listing_head(payload) {
                    Listing::Single => payload,
                    Listing::First(record) => record,
                    Listing::Empty => return self.absent(field),
                };
                match subject.get(field) {
                    Some(value) => Ok(is_truthy(value)),
                    None => self.absent(field),
                }
            }
            CompletionRule::RecordProperty {
                id_field,
                id,
                property,
                expected,
            } => {
                let record = find_record(payload, id_field, id)?;
                match record.get(property) {
                    Some(value) => Ok(value == expected),
                    None => Err(PollError::MissingField {
                        field: property.clone(),
                    }),
                }
            }
        }
    }

    fn absent(&self, field: &str) -> Result<bool, PollError> {
        if self.missing_field_is_incomplete {
            Ok(false)
        } else {
            Err(PollError::MissingField {
                field: field.to_string(),
            })
        }
    }
}

/// Shape of a possibly-paged payload
enum Listing<'a> {
    /// Not a listing; the payload is the resource itself
    Single,
    /// A listing with at least one record
    First(&'a Value),
    /// A listing with no records yet
    Empty,
}

fn listing_head(payload: &Value) -> Listing<'_> {
    match payload.get("results").and_then(Value::as_array) {
        Some(results) => match results.first() {
            Some(first) => Listing::First(first),
            None => Listing::Empty,
        },
        None => Listing::Single,
    }
}

/// Truthiness in the sense the stack's API uses: null, false, zero and
/// empty strings/collections all mean "not recorded yet".
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Find the record in `payload["results"]` whose `id_field` equals `id`
pub(crate) fn find_record<'a>(
    payload: &'a Value,
    id_field: &str,
    id: &Value,
) -> Result<&'a Value, PollError> {
    let results = payload
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| PollError::MissingField {
            field: "results".to_string(),
        })?;

    results
        .iter()
        .find(|record| record.get(id_field) == Some(id))
        .ok_or_else(|| PollError::RecordNotFound { id: id.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_finished_flag() {
        let predicate = CompletionPredicate::task_finished();

        assert!(!predicate.is_complete(&json!({"finished": false})).unwrap());
        assert!(predicate.is_complete(&json!({"finished": true})).unwrap());
    }

    #[test]
    fn test_task_finished_tolerates_missing_flag() {
        let predicate = CompletionPredicate::task_finished();
        assert!(!predicate.is_complete(&json!({"started": true})).unwrap());
    }

    #[test]
    fn test_flag_can_be_made_strict() {
        let predicate =
            CompletionPredicate::task_finished().with_missing_field_incomplete(false);
        let err = predicate.is_complete(&json!({})).unwrap_err();
        assert!(matches!(err, PollError::MissingField { field } if field == "finished"));
    }

    #[test]
    fn test_transfer_single_resource_shape() {
        let predicate = CompletionPredicate::transfer_complete();

        assert!(!predicate
            .is_complete(&json!({"transfer_datetime": null}))
            .unwrap());
        assert!(!predicate
            .is_complete(&json!({"transfer_status": "PENDING"}))
            .unwrap());
        assert!(predicate
            .is_complete(&json!({"transfer_datetime": "2024-01-01T00:00:00Z"}))
            .unwrap());
    }

    #[test]
    fn test_transfer_listing_shape() {
        let predicate = CompletionPredicate::transfer_complete();

        let pending = json!({"results": [{"transfer_datetime": null}]});
        assert!(!predicate.is_complete(&pending).unwrap());

        let done = json!({"results": [{
            "transfer_datetime": "2024-01-01T00:00:00Z",
            "transfer_status": "SUCCESS"
        }]});
        assert!(predicate.is_complete(&done).unwrap());
    }

    #[test]
    fn test_transfer_empty_listing_is_incomplete() {
        let predicate = CompletionPredicate::transfer_complete();
        assert!(!predicate.is_complete(&json!({"results": []})).unwrap());
    }

    #[test]
    fn test_transfer_empty_datetime_string_is_incomplete() {
        let predicate = CompletionPredicate::transfer_complete();
        assert!(!predicate
            .is_complete(&json!({"transfer_datetime": ""}))
            .unwrap());
    }

    #[test]
    fn test_job_request_property_match() {
        let predicate =
            CompletionPredicate::job_request_property(7, "job_status", json!("SUCCESS"));

        let waiting = json!({"results": [
            {"id": 3, "job_status": "SUCCESS"},
            {"id": 7, "job_status": "PENDING"},
        ]});
        assert!(!predicate.is_complete(&waiting).unwrap());

        let done = json!({"results": [
            {"id": 3, "job_status": "FAILURE"},
            {"id": 7, "job_status": "SUCCESS"},
        ]});
        assert!(predicate.is_complete(&done).unwrap());
    }

    #[test]
    fn test_job_request_missing_record_is_hard_failure() {
        let predicate = CompletionPredicate::job_request_property(7, "job_status", json!("SUCCESS"));
        let err = predicate
            .is_complete(&json!({"results": [{"id": 3}]}))
            .unwrap_err();
        assert!(matches!(err, PollError::RecordNotFound { id } if id == "7"));
    }

    #[test]
    fn test_job_request_missing_results_is_hard_failure() {
        let predicate = CompletionPredicate::job_request_property(7, "job_status", json!("SUCCESS"));
        let err = predicate.is_complete(&json!({"count": 0})).unwrap_err();
        assert!(matches!(err, PollError::MissingField { field } if field == "results"));
    }

    #[test]
    fn test_job_request_missing_property_is_hard_failure() {
        let predicate = CompletionPredicate::job_request_property(7, "job_status", json!("SUCCESS"));
        let err = predicate
            .is_complete(&json!({"results": [{"id": 7}]}))
            .unwrap_err();
        assert!(matches!(err, PollError::MissingField { field } if field == "job_status"));
    }
}
