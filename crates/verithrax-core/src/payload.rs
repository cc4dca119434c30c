//! The JSON document POSTed to the webhook.

use serde::{Deserialize, Serialize};

use crate::event::SaveEvent;
use crate::product::{Product, ProductAttribute};
use crate::settings::BrandSettings;
use crate::text::{strip_all_tags, strip_tags};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookAction {
    Created,
    Updated,
}

impl WebhookAction {
    #[must_use]
    pub fn from_update_flag(update: bool) -> Self {
        if update {
            WebhookAction::Updated
        } else {
            WebhookAction::Created
        }
    }
}

impl std::fmt::Display for WebhookAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebhookAction::Created => write!(f, "created"),
            WebhookAction::Updated => write!(f, "updated"),
        }
    }
}

/// Flat product description sent on every product save.
///
/// Every key is always serialized. Missing catalog data shows up as empty
/// strings and a `null` image.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub post_id: i64,
    pub post_title: String,
    pub post_content: String,
    pub product_image: Option<String>,
    pub regular_price: String,
    pub sale_price: String,
    pub price_display: String,
    pub attributes: String,
    pub product_link: String,
    pub brand_name: String,
    pub founders_name: String,
    pub about_brand: String,
    pub wp_base_url: String,
    pub wp_username: String,
    /// Sent as plaintext inside the body. The receiver uses it for REST
    /// calls back into the site.
    pub wp_app_password: String,
    pub action: WebhookAction,
}

impl WebhookPayload {
    /// Assembles the payload for `event`.
    ///
    /// Title and content come from the saved record itself; pricing,
    /// attributes, image and permalink come from `product`, which is `None`
    /// when the catalog had nothing for this id.
    #[must_use]
    pub fn build(event: &SaveEvent, product: Option<&Product>, settings: &BrandSettings) -> Self {
        let field =
            |f: fn(&Product) -> &str| product.map_or_else(String::new, |p| f(p).to_string());

        Self {
            post_id: event.post_id,
            post_title: event.title.clone(),
            post_content: strip_all_tags(&event.content),
            product_image: product
                .and_then(|p| p.image_url.clone())
                .filter(|url| !url.is_empty()),
            regular_price: field(|p| p.regular_price.as_str()),
            sale_price: field(|p| p.sale_price.as_str()),
            price_display: product.map_or_else(String::new, |p| strip_tags(&p.price_html)),
            attributes: product.map_or_else(String::new, |p| render_attributes(&p.attributes)),
            product_link: field(|p| p.permalink.as_str()),
            brand_name: settings.brand_name.clone(),
            founders_name: settings.founders.clone(),
            about_brand: settings.about_brand.clone(),
            wp_base_url: settings.wp_base_url.clone(),
            wp_username: settings.wp_username.clone(),
            wp_app_password: settings.wp_app_password.clone(),
            action: WebhookAction::from_update_flag(event.update),
        }
    }

    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl std::fmt::Debug for WebhookPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookPayload")
            .field("post_id", &self.post_id)
            .field("post_title", &self.post_title)
            .field("product_link", &self.product_link)
            .field("action", &self.action)
            .field("wp_base_url", &self.wp_base_url)
            .field("wp_username", &self.wp_username)
            .field(
                "wp_app_password",
                &(!self.wp_app_password.is_empty()).then_some("[redacted]"),
            )
            .finish_non_exhaustive()
    }
}

/// Renders every attribute and joins them with `" | "`.
#[must_use]
pub fn render_attributes(attributes: &[ProductAttribute]) -> String {
    attributes
        .iter()
        .map(ProductAttribute::render)
        .collect::<Vec<_>>()
        .join(" | ")
}
