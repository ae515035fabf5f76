//! Marketing-event forwarding with sensitive-field stripping.

use caseintake_core::OUTBOUND_HTTP_TIMEOUT_SECS;
use serde_json::{Map, Value};

use crate::error::OutboundError;

/// Property keys that never leave the backend, regardless of what the widget
/// sends along.
const STRIPPED_PROPERTY_KEYS: &[&str] = &[
    "email",
    "phone",
    "name",
    "firstName",
    "lastName",
    "contactEmail",
    "contactPhone",
    "hospitalName",
];

/// Client for the analytics ingestion endpoint.
pub struct AnalyticsClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl std::fmt::Debug for AnalyticsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"***")
            .finish_non_exhaustive()
    }
}

impl AnalyticsClient {
    /// Creates a client with a bounded request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(endpoint: String, api_key: String) -> Result<Self, OutboundError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(OUTBOUND_HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| OutboundError::ClientInit(e.to_string()))?;
        Ok(Self { client, endpoint, api_key })
    }

    /// Forward one event. Properties are stripped of sensitive fields before
    /// the call; the caller decides what a failure means (it never fails the
    /// primary response).
    pub async fn forward(
        &self,
        event: &str,
        properties: &Value,
        case_id: Option<&str>,
    ) -> Result<(), OutboundError> {
        let body = serde_json::json!({
            "event": event,
            "properties": strip_properties(properties),
            "caseId": case_id,
        });
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "<unreadable body>".to_owned());
            return Err(OutboundError::HttpStatus { code: status.as_u16(), body });
        }
        Ok(())
    }
}

/// Remove disallowed keys from an event's property map. Non-object values
/// are replaced with an empty object.
#[must_use]
pub fn strip_properties(properties: &Value) -> Value {
    match properties {
        Value::Object(map) => {
            let filtered: Map<String, Value> = map
                .iter()
                .filter(|(key, _)| !STRIPPED_PROPERTY_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            Value::Object(filtered)
        },
        _ => Value::Object(Map::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_sensitive_keys() {
        let stripped = strip_properties(&json!({
            "step": "hospital",
            "email": "user@example.com",
            "phone": "555-0100",
            "hospitalName": "General",
            "variant": "b",
        }));
        assert_eq!(stripped, json!({"step": "hospital", "variant": "b"}));
    }

    #[test]
    fn keeps_clean_properties_untouched() {
        let props = json!({"step": "balance", "durationMs": 1200});
        assert_eq!(strip_properties(&props), props);
    }

    #[test]
    fn non_object_properties_become_empty_object() {
        assert_eq!(strip_properties(&json!("nope")), json!({}));
        assert_eq!(strip_properties(&json!(null)), json!({}));
    }
}
