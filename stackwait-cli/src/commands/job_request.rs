//! Job request wait command

use anyhow::Result;
use chrono::Utc;
use colored::*;
use serde_json::Value;

use crate::config::Config;

/// Wait for a job request property to reach the expected value
pub async fn wait(config: &Config, id: i64, property: &str, value: &str) -> Result<()> {
    let client = config.client()?;
    let expected = parse_value(value);

    println!(
        "Waiting for job request {} to have {}={} [{}]...",
        id,
        property,
        expected,
        Utc::now()
    );

    match client
        .wait_for_job_request_property(id, property, &expected, config.timeout)
        .await
    {
        Ok(_record) => {
            println!(
                "{}",
                format!("Job request {id} reached {property}={expected} [{}]", Utc::now()).green()
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", format!("Job request wait failed: {e}").red());
            Err(e.into())
        }
    }
}

/// Parse the expected value as a JSON literal, falling back to a bare
/// string so `--value SUCCESS` works without quoting.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_value_json_literals() {
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("42"), json!(42));
        assert_eq!(parse_value("\"SUCCESS\""), json!("SUCCESS"));
    }

    #[test]
    fn test_parse_value_bare_string() {
        assert_eq!(parse_value("SUCCESS"), json!("SUCCESS"));
    }
}
