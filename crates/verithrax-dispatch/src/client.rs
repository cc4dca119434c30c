use std::time::{Duration, Instant};

use reqwest::{Client, Url};
use verithrax_core::WebhookPayload;

use crate::error::DeliveryError;

/// What came back from a delivery attempt. Recorded for logs only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub status: u16,
    pub elapsed: Duration,
}

/// Result of one best-effort POST.
///
/// Callers log the error arm and move on; nothing is retried.
pub type DeliveryResult = Result<DeliveryReceipt, DeliveryError>;

/// Sends payloads to the single configured webhook endpoint.
pub struct WebhookClient {
    client: Client,
    url: Url,
}

impl WebhookClient {
    /// `timeout_secs` bounds the whole request, connect included.
    ///
    /// # Errors
    ///
    /// - [`DeliveryError::InvalidUrl`] if `url` does not parse.
    /// - [`DeliveryError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, DeliveryError> {
        let url = Url::parse(url).map_err(|e| DeliveryError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, url })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// POSTs `payload` as JSON. The response body is never read.
    pub async fn send(&self, payload: &WebhookPayload) -> DeliveryResult {
        let body = payload.to_json().map_err(|e| DeliveryError::Serialize {
            post_id: payload.post_id,
            source: e,
        })?;

        let started = Instant::now();
        let response = self
            .client
            .post(self.url.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        Ok(DeliveryReceipt {
            status: response.status().as_u16(),
            elapsed: started.elapsed(),
        })
    }
}
