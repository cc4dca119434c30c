use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to serialize payload for post {post_id}: {source}")]
    Serialize {
        post_id: i64,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid webhook URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}
