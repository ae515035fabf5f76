//! Double-opt-in email triggering against the transactional-email provider.

use caseintake_core::OUTBOUND_HTTP_TIMEOUT_SECS;

use crate::error::OutboundError;

/// Client for the provider's double-opt-in contact endpoint.
pub struct OptInClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl std::fmt::Debug for OptInClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptInClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"***")
            .finish_non_exhaustive()
    }
}

impl OptInClient {
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

    /// Trigger the confirmation email for one address. The provider handles
    /// the actual double-opt-in flow; this call only starts it.
    pub async fn trigger_double_opt_in(
        &self,
        email: &str,
        case_id: &str,
    ) -> Result<(), OutboundError> {
        let body = serde_json::json!({
            "email": email,
            "attributes": { "caseId": case_id },
        });
        let response = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
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
