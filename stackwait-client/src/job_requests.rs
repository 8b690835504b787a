//! Job request endpoint
//!
//! Submitted jobs show up in the job request listing; a wait watches one
//! record (matched by id) until a named property reaches an expected
//! value. Unlike tasks and transfers, a listing without the record is a
//! hard failure: the job request either exists or something is wrong.

use serde_json::Value;
use std::time::Duration;

use stackwait_core::{CompletionPredicate, Poller, extract};
use tracing::info;

use crate::{Result, StackClient};

/// Job request listing endpoint (trailing slash matters to the stack)
pub const JOB_REQUEST_ENDPOINT: &str = "/api/job_request/";

impl StackClient {
    /// Wait until the job request's `property` equals `expected`.
    ///
    /// # Arguments
    /// * `job_request_id` - Server-assigned id of the job request
    /// * `property` - Record property to watch, e.g. `job_status`
    /// * `expected` - Value that ends the wait, e.g. `"SUCCESS"` or `true`
    /// * `timeout` - Overall deadline for this wait
    ///
    /// # Returns
    /// The matched job request record.
    pub async fn wait_for_job_request_property(
        &self,
        job_request_id: i64,
        property: &str,
        expected: &Value,
        timeout: Duration,
    ) -> Result<Value> {
        let poller = Poller::from_settings(self.settings(), timeout)?;
        let predicate =
            CompletionPredicate::job_request_property(job_request_id, property, expected.clone());

        info!(
            "Waiting for job request {} to have {}={}",
            job_request_id, property, expected
        );
        let outcome = poller
            .poll(|| self.fetch_status(JOB_REQUEST_ENDPOINT), &predicate)
            .await;
        let payload = outcome.into_completed()?;

        let record = extract::record(&payload, "id", &Value::from(job_request_id))?;
        info!("Job request {} satisfied {}", job_request_id, property);

        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PollSettings;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> StackClient {
        let settings = PollSettings {
            poll_interval: Duration::from_millis(20),
            request_timeout: Duration::from_secs(5),
        };
        StackClient::from_settings(server.uri(), settings).unwrap()
    }

    #[tokio::test]
    async fn test_waits_until_property_reaches_value() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(JOB_REQUEST_ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"id": 3, "job_status": "SUCCESS"},
                    {"id": 7, "job_status": "PENDING"},
                ]
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(JOB_REQUEST_ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"id": 3, "job_status": "SUCCESS"},
                    {"id": 7, "job_status": "SUCCESS"},
                ]
            })))
            .mount(&server)
            .await;

        let record = test_client(&server)
            .wait_for_job_request_property(7, "job_status", &json!("SUCCESS"), Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(record["id"], 7);
        assert_eq!(record["job_status"], "SUCCESS");
    }

    #[tokio::test]
    async fn test_missing_record_fails_without_retrying() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(JOB_REQUEST_ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"id": 3, "job_status": "SUCCESS"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = test_client(&server)
            .wait_for_job_request_property(7, "job_status", &json!("SUCCESS"), Duration::from_secs(5))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            crate::ClientError::Poll(stackwait_core::PollError::RecordNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_boolean_property_values_work() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(JOB_REQUEST_ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"id": 7, "started": true}]
            })))
            .mount(&server)
            .await;

        let record = test_client(&server)
            .wait_for_job_request_property(7, "started", &json!(true), Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(record["started"], true);
    }
}
