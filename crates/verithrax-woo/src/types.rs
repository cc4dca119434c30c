//! WooCommerce REST API (`/wp-json/wc/v3`) product shapes.
//!
//! ### Prices
//! `regular_price` and `sale_price` are decimal strings; an unset sale price
//! is `""`, not `null`. `price_html` is the storefront rendering, markup
//! included.
//!
//! ### Attributes
//! Global (taxonomy-backed) attributes carry their non-zero term-taxonomy
//! `id` and list the assigned term names in `options`. Custom per-product
//! attributes always have `id: 0`. `slug` is only present on newer stores.

use serde::Deserialize;

/// A single product from `GET /wp-json/wc/v3/products/{id}`.
#[derive(Debug, Deserialize)]
pub struct WooProduct {
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub permalink: String,

    /// Raw HTML long description (the post content).
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub regular_price: String,

    #[serde(default)]
    pub sale_price: String,

    #[serde(default)]
    pub price_html: String,

    /// Gallery; the first entry is the featured image.
    #[serde(default)]
    pub images: Vec<WooImage>,

    #[serde(default)]
    pub attributes: Vec<WooAttribute>,
}

#[derive(Debug, Deserialize)]
pub struct WooImage {
    #[serde(default)]
    pub id: Option<i64>,
    /// Full-size image URL.
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WooAttribute {
    /// `0` for custom attributes, the global attribute id otherwise.
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub position: Option<i32>,
    #[serde(default)]
    pub options: Vec<String>,
}
