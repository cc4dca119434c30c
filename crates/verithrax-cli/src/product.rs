//! `payload` and `dispatch` command handlers.

use std::path::{Path, PathBuf};

use anyhow::Context;
use verithrax_core::{
    AppConfig, BrandSettings, Product, SaveEvent, StaticProductSource, WebhookPayload,
    YamlSettingsStore, PRODUCT_POST_TYPE,
};
use verithrax_dispatch::{DispatchOutcome, Dispatcher, WebhookClient};
use verithrax_woo::WooClient;

/// Where `dispatch` gets its product from.
#[derive(Debug)]
pub(crate) enum DispatchTarget {
    File(PathBuf),
    StoreId(i64),
}

pub(crate) fn read_product_file(path: &Path) -> anyhow::Result<Product> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read product file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse product file {}", path.display()))
}

fn load_settings(settings_path: &Path, site_url: &str) -> anyhow::Result<BrandSettings> {
    let store = YamlSettingsStore::open(settings_path)?;
    Ok(BrandSettings::load(&store, site_url))
}

/// Payload exactly as it would be sent, pretty-printed.
pub(crate) fn render_payload(
    product: &Product,
    settings: &BrandSettings,
    update: bool,
) -> anyhow::Result<String> {
    let event = SaveEvent::for_product(product, update);
    let payload = WebhookPayload::build(&event, Some(product), settings);
    Ok(serde_json::to_string_pretty(&payload)?)
}

pub(crate) fn run_payload(
    settings_path: &Path,
    site_url: &str,
    product_path: &Path,
    update: bool,
) -> anyhow::Result<()> {
    let product = read_product_file(product_path)?;
    let settings = load_settings(settings_path, site_url)?;
    println!("{}", render_payload(&product, &settings, update)?);
    Ok(())
}

pub(crate) async fn run_dispatch(
    config: &AppConfig,
    target: DispatchTarget,
    update: bool,
) -> anyhow::Result<()> {
    let settings = load_settings(&config.settings_path, &config.site_url)?;

    let (event, product) = match target {
        DispatchTarget::File(path) => {
            let product = read_product_file(&path)?;
            (SaveEvent::for_product(&product, update), Some(product))
        }
        DispatchTarget::StoreId(id) => {
            let product = fetch_store_product(config, &settings, id).await;
            let event = match &product {
                Some(product) => SaveEvent::for_product(product, update),
                None => SaveEvent {
                    post_id: id,
                    post_type: PRODUCT_POST_TYPE.to_string(),
                    title: String::new(),
                    content: String::new(),
                    is_revision: false,
                    is_autosave: false,
                    update,
                },
            };
            (event, product)
        }
    };

    let client = WebhookClient::new(
        &config.webhook_url,
        config.webhook_timeout_secs,
        &config.user_agent,
    )?;
    let dispatcher = Dispatcher::new(client);
    let source = StaticProductSource::new(product);
    let outcome = dispatcher.handle(&event, &settings, &source).await;

    println!("{}", describe_outcome(event.post_id, &outcome));
    Ok(())
}

/// Reads the product through the store API. Any failure degrades to `None`
/// so the webhook still goes out with empty catalog fields.
async fn fetch_store_product(
    config: &AppConfig,
    settings: &BrandSettings,
    id: i64,
) -> Option<Product> {
    let client =
        match WooClient::from_settings(settings, config.woo_timeout_secs, &config.user_agent) {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(post_id = id, error = %e, "store client unavailable; sending without catalog fields");
                return None;
            }
        };

    match client.fetch_product(id).await {
        Ok(Some(product)) => Some(product),
        Ok(None) => {
            tracing::warn!(post_id = id, "product not found; sending without catalog fields");
            None
        }
        Err(e) => {
            tracing::warn!(post_id = id, error = %e, "product lookup failed; sending without catalog fields");
            None
        }
    }
}

pub(crate) fn describe_outcome(post_id: i64, outcome: &DispatchOutcome) -> String {
    match outcome {
        DispatchOutcome::Skipped(reason) => format!("post {post_id}: skipped ({reason})"),
        DispatchOutcome::Sent(Ok(receipt)) => format!(
            "post {post_id}: sent, webhook answered {} in {} ms",
            receipt.status,
            receipt.elapsed.as_millis()
        ),
        DispatchOutcome::Sent(Err(e)) => format!("post {post_id}: sent, delivery failed: {e}"),
    }
}
