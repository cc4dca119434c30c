//! Browser settings page.
//!
//! Fields are named by storage key, so a submitted form maps one-to-one onto
//! the store. The application password is never echoed back; submitting the
//! field blank keeps the stored value.

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use maud::{html, Markup, DOCTYPE};
use serde::Deserialize;
use verithrax_core::{save_setting, BrandSettings, SettingKey};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

const PAGE_PATH: &str = "/admin/settings";

const BRAND_FIELDS: [SettingKey; 3] = [
    SettingKey::BrandName,
    SettingKey::Founders,
    SettingKey::AboutBrand,
];

const CREDENTIAL_FIELDS: [SettingKey; 3] = [
    SettingKey::WpBaseUrl,
    SettingKey::WpUsername,
    SettingKey::WpAppPassword,
];

#[derive(Debug, Deserialize)]
pub(super) struct PageQuery {
    #[serde(default)]
    updated: Option<String>,
}

pub(super) async fn settings_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let settings = BrandSettings::load(state.settings.as_ref(), &state.config.site_url);
    Html(render_page(&settings, query.updated.is_some()).into_string())
}

pub(super) async fn submit_settings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Form(form): Form<BTreeMap<String, String>>,
) -> Result<Response, ApiError> {
    for (name, raw) in &form {
        let Ok(key) = name.parse::<SettingKey>() else {
            tracing::debug!(field = %name, "ignoring unknown form field");
            continue;
        };
        if key.is_secret() && raw.trim().is_empty() {
            continue;
        }
        save_setting(state.settings.as_ref(), key, raw).map_err(|e| {
            tracing::error!(setting = %key, error = %e, "failed to save setting");
            ApiError::new(req_id.0.clone(), "internal_error", "failed to save settings")
        })?;
    }

    Ok(Redirect::to(&format!("{PAGE_PATH}?updated=true")).into_response())
}

fn render_page(settings: &BrandSettings, updated: bool) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Verithrax Config" }
            }
            body {
                div class="wrap" {
                    h1 { "Verithrax AI Configuration" }
                    @if updated {
                        div class="notice notice-success" { p { "Settings saved." } }
                    }
                    form method="post" action=(PAGE_PATH) {
                        table class="form-table" {
                            (section_heading("Brand Information"))
                            @for key in BRAND_FIELDS {
                                (field_row(key, settings.value(key)))
                            }
                            (section_heading("WordPress API Credentials"))
                            @for key in CREDENTIAL_FIELDS {
                                (field_row(key, settings.value(key)))
                            }
                        }
                        p class="submit" {
                            button type="submit" class="button button-primary" { "Save Changes" }
                        }
                    }
                }
            }
        }
    }
}

fn section_heading(title: &str) -> Markup {
    html! {
        tr {
            th scope="row" { h2 { (title) } }
            td {}
        }
    }
}

fn field_row(key: SettingKey, value: &str) -> Markup {
    let name = key.storage_key();
    html! {
        tr {
            th scope="row" { label for=(name) { (key.label()) } }
            td {
                @match key {
                    SettingKey::AboutBrand => {
                        textarea id=(name) name=(name) rows="5" cols="50" { (value) }
                    }
                    SettingKey::WpBaseUrl => {
                        input type="url" id=(name) name=(name) value=(value) style="width: 400px;";
                        p class="description" { "Your WordPress site URL (e.g., https://yoursite.com)" }
                    }
                    SettingKey::WpUsername => {
                        input type="text" id=(name) name=(name) value=(value) style="width: 300px;";
                        p class="description" { "WordPress username or email for API authentication" }
                    }
                    SettingKey::WpAppPassword => {
                        input type="password" id=(name) name=(name) value="" autocomplete="new-password"
                            placeholder=(if value.is_empty() { "not set" } else { "stored; leave blank to keep" })
                            style="width: 300px;";
                        p class="description" {
                            "Create one under Users → Profile → Application Passwords. "
                            "It is sent in plain text inside every webhook body."
                        }
                    }
                    SettingKey::BrandName | SettingKey::Founders => {
                        input type="text" id=(name) name=(name) value=(value) style="width: 300px;";
                    }
                }
            }
        }
    }
}
