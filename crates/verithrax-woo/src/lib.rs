pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::WooClient;
pub use error::WooError;
pub use normalize::normalize_product;
pub use types::{WooAttribute, WooImage, WooProduct};
