use std::collections::BTreeMap;

use axum::{extract::State, Extension, Json};
use verithrax_core::{save_setting, BrandSettings, SettingKey};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

pub(super) async fn get_settings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<BrandSettings>> {
    let settings = BrandSettings::load(state.settings.as_ref(), &state.config.site_url);
    Json(ApiResponse::new(req_id.0, settings.redacted()))
}

/// Updates any subset of settings. Keys may be short names or storage keys;
/// every key is validated before anything is written.
pub(super) async fn update_settings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<BTreeMap<String, String>>,
) -> Result<Json<ApiResponse<BrandSettings>>, ApiError> {
    let updates = body
        .iter()
        .map(|(name, value)| {
            name.parse::<SettingKey>()
                .map(|key| (key, value.as_str()))
                .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (key, raw) in updates {
        save_setting(state.settings.as_ref(), key, raw).map_err(|e| {
            tracing::error!(setting = %key, error = %e, "failed to save setting");
            ApiError::new(req_id.0.clone(), "internal_error", "failed to save settings")
        })?;
    }

    let settings = BrandSettings::load(state.settings.as_ref(), &state.config.site_url);
    Ok(Json(ApiResponse::new(req_id.0, settings.redacted())))
}
