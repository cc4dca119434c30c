pub mod app_config;
pub mod config;
pub mod event;
pub mod payload;
pub mod product;
pub mod settings;
pub mod text;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use event::{SaveEvent, PRODUCT_POST_TYPE};
pub use payload::{render_attributes, WebhookAction, WebhookPayload};
pub use product::{Product, ProductAttribute, ProductSource, SourceError, StaticProductSource};
pub use settings::{
    sanitize_text_field, save_setting, BrandSettings, MemorySettingsStore, SettingKey,
    SettingsStore, YamlSettingsStore,
};

/// Errors raised while loading process configuration or the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to access settings file {path}: {source}")]
    SettingsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file: {0}")]
    SettingsFileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
