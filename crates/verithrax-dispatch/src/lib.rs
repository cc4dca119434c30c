//! Product-save webhook delivery.
//!
//! [`Dispatcher::handle`] is the entry point: it gates the event, reads the
//! product, builds the payload and sends it once. Delivery is best-effort;
//! the outcome is returned for logging and never as an `Err`.

pub mod client;
pub mod dispatcher;
pub mod error;
pub mod gate;

pub use client::{DeliveryReceipt, DeliveryResult, WebhookClient};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error::DeliveryError;
pub use gate::{check_event, SkipReason};
