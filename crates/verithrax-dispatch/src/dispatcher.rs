use verithrax_core::{BrandSettings, ProductSource, SaveEvent, WebhookPayload};

use crate::client::{DeliveryResult, WebhookClient};
use crate::gate::{check_event, SkipReason};

/// What [`Dispatcher::handle`] did with an event.
#[derive(Debug)]
pub enum DispatchOutcome {
    Skipped(SkipReason),
    /// One POST was attempted. The result is informational.
    Sent(DeliveryResult),
}

impl DispatchOutcome {
    #[must_use]
    pub fn was_sent(&self) -> bool {
        matches!(self, DispatchOutcome::Sent(_))
    }
}

pub struct Dispatcher {
    client: WebhookClient,
}

impl Dispatcher {
    #[must_use]
    pub fn new(client: WebhookClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn client(&self) -> &WebhookClient {
        &self.client
    }

    /// Handles one save notification.
    ///
    /// `settings` should be loaded by the caller at event entry. A product
    /// source failure is treated like a missing product: the payload still
    /// goes out with empty catalog fields.
    #[tracing::instrument(
        name = "dispatch_product_webhook",
        skip_all,
        fields(post_id = event.post_id, post_type = %event.post_type, update = event.update)
    )]
    pub async fn handle(
        &self,
        event: &SaveEvent,
        settings: &BrandSettings,
        source: &dyn ProductSource,
    ) -> DispatchOutcome {
        if let Err(reason) = check_event(event) {
            tracing::debug!(%reason, "save event skipped");
            return DispatchOutcome::Skipped(reason);
        }

        let product = match source.fetch_product(event.post_id).await {
            Ok(product) => product,
            Err(e) => {
                tracing::warn!(error = %e, "product lookup failed; sending without catalog fields");
                None
            }
        };
        if product.is_none() {
            tracing::debug!("no catalog entry for post");
        }

        let payload = WebhookPayload::build(event, product.as_ref(), settings);
        let result = self.client.send(&payload).await;

        match &result {
            Ok(receipt) => tracing::info!(
                action = %payload.action,
                status = receipt.status,
                elapsed_ms = u64::try_from(receipt.elapsed.as_millis()).unwrap_or(u64::MAX),
                "product webhook delivered"
            ),
            Err(e) => tracing::warn!(action = %payload.action, error = %e, "product webhook delivery failed"),
        }

        DispatchOutcome::Sent(result)
    }
}
