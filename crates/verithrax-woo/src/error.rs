use thiserror::Error;

#[derive(Debug, Error)]
pub enum WooError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("store rejected credentials ({status}) for {url}")]
    Unauthorized { status: u16, url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid store URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
