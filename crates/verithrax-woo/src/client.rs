//! HTTP client for the WooCommerce REST products endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use verithrax_core::{BrandSettings, Product, ProductSource, SourceError};

use crate::error::WooError;
use crate::normalize::normalize_product;
use crate::types::WooProduct;

/// Upper bound on TCP/TLS connect time; never longer than the request timeout.
const CONNECT_TIMEOUT_SECS: u64 = 10;

fn connect_timeout(request_timeout_secs: u64) -> Duration {
    Duration::from_secs(CONNECT_TIMEOUT_SECS.min(request_timeout_secs))
}

/// Reads single products from `{base}/wp-json/wc/v3/products/{id}`.
///
/// Authenticates with HTTP Basic using a WordPress username and application
/// password. A 404 is not an error: it means the product does not exist.
pub struct WooClient {
    client: Client,
    base_url: Url,
    username: String,
    app_password: String,
}

impl WooClient {
    /// # Errors
    ///
    /// - [`WooError::InvalidBaseUrl`] if `base_url` does not parse.
    /// - [`WooError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        username: &str,
        app_password: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, WooError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(connect_timeout(timeout_secs))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment (sites installed under a subdirectory).
        let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| WooError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(WooError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: "scheme must be http or https".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url,
            username: username.to_owned(),
            app_password: app_password.to_owned(),
        })
    }

    /// Builds a client from the credentials entered in the settings form.
    ///
    /// # Errors
    ///
    /// Same as [`WooClient::new`].
    pub fn from_settings(
        settings: &BrandSettings,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, WooError> {
        Self::new(
            &settings.wp_base_url,
            &settings.wp_username,
            &settings.wp_app_password,
            timeout_secs,
            user_agent,
        )
    }

    /// Fetches and normalizes one product. `Ok(None)` when the store answers 404.
    ///
    /// # Errors
    ///
    /// - [`WooError::Unauthorized`] on 401/403.
    /// - [`WooError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`WooError::Http`] on network or TLS failure.
    /// - [`WooError::Deserialize`] if the body is not a product object.
    pub async fn fetch_product(&self, id: i64) -> Result<Option<Product>, WooError> {
        let url = self.product_url(id)?;

        let mut request = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        if !self.username.is_empty() {
            request = request.basic_auth(&self.username, Some(&self.app_password));
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(product_id = id, "product not found in store");
            return Ok(None);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(WooError::Unauthorized {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(WooError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<WooProduct>(&body).map_err(|e| WooError::Deserialize {
            context: format!("product {id}"),
            source: e,
        })?;

        Ok(Some(normalize_product(parsed)))
    }

    fn product_url(&self, id: i64) -> Result<Url, WooError> {
        self.base_url
            .join(&format!("wp-json/wc/v3/products/{id}"))
            .map_err(|e| WooError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl ProductSource for WooClient {
    async fn fetch_product(&self, id: i64) -> Result<Option<Product>, SourceError> {
        WooClient::fetch_product(self, id)
            .await
            .map_err(|e| SourceError {
                source_name: "woocommerce",
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
