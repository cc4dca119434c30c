use serde::{Deserialize, Serialize};

/// Content type name the host uses for store products.
pub const PRODUCT_POST_TYPE: &str = "product";

/// A "content saved" notification from the host.
///
/// Carries the saved record's own fields; catalog data (prices, attributes,
/// image, permalink) is read separately through a
/// [`ProductSource`](crate::ProductSource).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveEvent {
    pub post_id: i64,
    pub post_type: String,
    #[serde(default)]
    pub title: String,
    /// Raw HTML body as saved.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_revision: bool,
    #[serde(default)]
    pub is_autosave: bool,
    /// `true` when an existing record was updated rather than created.
    #[serde(default)]
    pub update: bool,
}

impl SaveEvent {
    /// Builds the notification the host would send for saving `product`.
    #[must_use]
    pub fn for_product(product: &crate::Product, update: bool) -> Self {
        Self {
            post_id: product.id,
            post_type: PRODUCT_POST_TYPE.to_string(),
            title: product.title.clone(),
            content: product.content.clone(),
            is_revision: false,
            is_autosave: false,
            update,
        }
    }
}
