use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A store product as read from the host catalog, reduced to the fields the
/// webhook carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    /// Raw HTML body.
    #[serde(default)]
    pub content: String,
    /// Decimal string exactly as the store reports it, e.g. `"10.00"`.
    /// Empty when unset.
    #[serde(default)]
    pub regular_price: String,
    #[serde(default)]
    pub sale_price: String,
    /// Price as the storefront renders it, markup included
    /// (e.g. `<del>$10</del> <ins>$5</ins>`).
    #[serde(default)]
    pub price_html: String,
    #[serde(default)]
    pub permalink: String,
    /// Full-size featured image.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Attributes in the order the store lists them.
    #[serde(default)]
    pub attributes: Vec<ProductAttribute>,
}

/// A product attribute.
///
/// Taxonomy attributes draw their values from a shared vocabulary (global
/// attributes such as `pa_material`); plain attributes are typed per product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductAttribute {
    Taxonomy {
        /// Taxonomy slug, e.g. `"pa_material"`.
        taxonomy: String,
        /// Human label registered for the taxonomy, e.g. `"Material"`.
        label: String,
        /// Display names of the terms assigned to this product.
        #[serde(default)]
        terms: Vec<String>,
    },
    Plain {
        name: String,
        #[serde(default)]
        options: Vec<String>,
    },
}

impl ProductAttribute {
    /// Renders `"<label>: <value(s)>"`.
    ///
    /// Taxonomy terms are joined with `", "`. Plain attributes only show their
    /// first option. An attribute with no values renders as `"<label>: "`.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            ProductAttribute::Taxonomy { label, terms, .. } => {
                format!("{label}: {}", terms.join(", "))
            }
            ProductAttribute::Plain { name, options } => {
                format!("{name}: {}", options.first().map_or("", String::as_str))
            }
        }
    }
}

#[derive(Debug, Error)]
#[error("product source {source_name} failed: {message}")]
pub struct SourceError {
    pub source_name: &'static str,
    pub message: String,
}

/// Where product fields come from.
///
/// `Ok(None)` means the store has no product with that id.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch_product(&self, id: i64) -> Result<Option<Product>, SourceError>;
}

/// Fixed in-memory catalog. Backs inline snapshots and JSON fixtures.
#[derive(Debug, Clone, Default)]
pub struct StaticProductSource {
    products: HashMap<i64, Product>,
}

impl StaticProductSource {
    #[must_use]
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductSource for StaticProductSource {
    async fn fetch_product(&self, id: i64) -> Result<Option<Product>, SourceError> {
        Ok(self.products.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_attribute_joins_terms() {
        let attr = ProductAttribute::Taxonomy {
            taxonomy: "pa_material".into(),
            label: "Material".into(),
            terms: vec!["Cotton".into(), "Wool".into()],
        };
        assert_eq!(attr.render(), "Material: Cotton, Wool");
    }

    #[test]
    fn plain_attribute_uses_first_option_only() {
        let attr = ProductAttribute::Plain {
            name: "Size".into(),
            options: vec!["Large".into(), "Small".into()],
        };
        assert_eq!(attr.render(), "Size: Large");
    }

    #[test]
    fn empty_attributes_keep_the_colon() {
        let taxonomy = ProductAttribute::Taxonomy {
            taxonomy: "pa_finish".into(),
            label: "Finish".into(),
            terms: vec![],
        };
        let plain = ProductAttribute::Plain {
            name: "Glaze".into(),
            options: vec![],
        };
        assert_eq!(taxonomy.render(), "Finish: ");
        assert_eq!(plain.render(), "Glaze: ");
    }

    #[test]
    fn attribute_deserializes_from_tagged_json() {
        let attr: ProductAttribute = serde_json::from_str(
            r#"{"kind":"plain","name":"Color","options":["Blue"]}"#,
        )
        .expect("valid attribute json");
        assert_eq!(
            attr,
            ProductAttribute::Plain {
                name: "Color".into(),
                options: vec!["Blue".into()],
            }
        );
    }

    #[tokio::test]
    async fn static_source_returns_none_for_unknown_id() {
        let source = StaticProductSource::new([Product {
            id: 7,
            ..Product::default()
        }]);
        assert!(source.fetch_product(7).await.unwrap().is_some());
        assert!(source.fetch_product(8).await.unwrap().is_none());
    }
}
