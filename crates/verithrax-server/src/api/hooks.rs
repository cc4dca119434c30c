use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use verithrax_core::{BrandSettings, Product, ProductSource, SaveEvent, StaticProductSource};
use verithrax_dispatch::{DispatchOutcome, SkipReason};
use verithrax_woo::WooClient;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

/// Body of a product-save notification.
///
/// `product` is an optional catalog snapshot. Without it the product is read
/// from the store's REST API using the saved credentials.
#[derive(Debug, Deserialize)]
pub(super) struct ProductSavedRequest {
    #[serde(flatten)]
    event: SaveEvent,
    #[serde(default)]
    product: Option<Product>,
}

#[derive(Debug, Serialize)]
pub(super) struct DispatchSummary {
    status: &'static str,
    #[serde(flatten)]
    skip: Option<SkipReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivered: Option<bool>,
}

impl From<&DispatchOutcome> for DispatchSummary {
    fn from(outcome: &DispatchOutcome) -> Self {
        match outcome {
            DispatchOutcome::Skipped(reason) => Self {
                status: "skipped",
                skip: Some(reason.clone()),
                delivered: None,
            },
            DispatchOutcome::Sent(result) => Self {
                status: "sent",
                skip: None,
                delivered: Some(result.is_ok()),
            },
        }
    }
}

/// Runs the dispatcher inline and always answers 202; delivery failures are
/// only logged.
pub(super) async fn product_saved(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ProductSavedRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DispatchSummary>>), ApiError> {
    let ProductSavedRequest { event, product } = body;

    if let Some(product) = &product {
        if product.id != event.post_id {
            return Err(ApiError::new(
                req_id.0,
                "validation_error",
                format!(
                    "product.id {} does not match post_id {}",
                    product.id, event.post_id
                ),
            ));
        }
    }

    let settings = BrandSettings::load(state.settings.as_ref(), &state.config.site_url);
    let source = resolve_source(&state, &settings, product);
    let outcome = state
        .dispatcher
        .handle(&event, &settings, source.as_ref())
        .await;

    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::new(req_id.0, DispatchSummary::from(&outcome))),
    ))
}

fn resolve_source(
    state: &AppState,
    settings: &BrandSettings,
    inline: Option<Product>,
) -> Box<dyn ProductSource> {
    if let Some(product) = inline {
        return Box::new(StaticProductSource::new([product]));
    }

    match WooClient::from_settings(
        settings,
        state.config.woo_timeout_secs,
        &state.config.user_agent,
    ) {
        Ok(client) => Box::new(client),
        Err(e) => {
            tracing::warn!(error = %e, "store client unavailable; catalog fields will be empty");
            Box::new(StaticProductSource::empty())
        }
    }
}

#[cfg(test)]
#[path = "hooks_test.rs"]
mod tests;
