use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-level configuration, read once at startup.
///
/// Brand and credential values live in the settings store instead; see
/// [`crate::settings`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Destination for every product webhook.
    pub webhook_url: String,
    /// Home URL of the store site. Used as the `wp_base_url` fallback.
    pub site_url: String,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub settings_path: PathBuf,
    pub webhook_timeout_secs: u64,
    pub woo_timeout_secs: u64,
    pub user_agent: String,
}
