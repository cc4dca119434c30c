//! Brand and credential settings edited through the admin form.
//!
//! Values live in a flat key/value store. An absent key falls back to its
//! default; a key saved as an empty string stays empty.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde::Serialize;

use crate::ConfigError;

pub use crate::text::{sanitize_text_field, sanitize_textarea_field};

pub const DEFAULT_BRAND_NAME: &str = "SaroGenix";
pub const DEFAULT_FOUNDERS: &str = "Rohan & Abhigyan";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    BrandName,
    Founders,
    AboutBrand,
    WpBaseUrl,
    WpUsername,
    WpAppPassword,
}

impl SettingKey {
    pub const ALL: [SettingKey; 6] = [
        SettingKey::BrandName,
        SettingKey::Founders,
        SettingKey::AboutBrand,
        SettingKey::WpBaseUrl,
        SettingKey::WpUsername,
        SettingKey::WpAppPassword,
    ];

    /// Short name used in the API, the CLI and form fields.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SettingKey::BrandName => "brand_name",
            SettingKey::Founders => "founders",
            SettingKey::AboutBrand => "about_brand",
            SettingKey::WpBaseUrl => "wp_base_url",
            SettingKey::WpUsername => "wp_username",
            SettingKey::WpAppPassword => "wp_app_password",
        }
    }

    /// Key under which the value is persisted.
    #[must_use]
    pub fn storage_key(self) -> String {
        format!("verithrax_{}", self.name())
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SettingKey::BrandName => "Brand Name",
            SettingKey::Founders => "Founders",
            SettingKey::AboutBrand => "About Brand / Company Context",
            SettingKey::WpBaseUrl => "WordPress Base URL",
            SettingKey::WpUsername => "WordPress Username",
            SettingKey::WpAppPassword => "Application Password",
        }
    }

    #[must_use]
    pub fn is_secret(self) -> bool {
        matches!(self, SettingKey::WpAppPassword)
    }

    #[must_use]
    pub fn is_multiline(self) -> bool {
        matches!(self, SettingKey::AboutBrand)
    }

    /// Value used when the key has never been saved.
    #[must_use]
    pub fn default_value(self, site_url: &str) -> String {
        match self {
            SettingKey::BrandName => DEFAULT_BRAND_NAME.to_string(),
            SettingKey::Founders => DEFAULT_FOUNDERS.to_string(),
            SettingKey::WpBaseUrl => site_url.to_string(),
            SettingKey::AboutBrand | SettingKey::WpUsername | SettingKey::WpAppPassword => {
                String::new()
            }
        }
    }

    /// Cleans a submitted value before it is stored.
    #[must_use]
    pub fn sanitize(self, raw: &str) -> String {
        if self.is_multiline() {
            sanitize_textarea_field(raw)
        } else {
            sanitize_text_field(raw)
        }
    }
}

impl std::fmt::Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for SettingKey {
    type Err = ConfigError;

    /// Accepts both the short name (`brand_name`) and the storage key
    /// (`verithrax_brand_name`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let short = s.strip_prefix("verithrax_").unwrap_or(s);
        SettingKey::ALL
            .into_iter()
            .find(|k| k.name() == short)
            .ok_or_else(|| ConfigError::Validation(format!("unknown setting \"{s}\"")))
    }
}

/// Key/value storage for settings.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: SettingKey) -> Option<String>;

    /// # Errors
    ///
    /// Returns `ConfigError` if the value cannot be persisted.
    fn set(&self, key: SettingKey, value: &str) -> Result<(), ConfigError>;

    fn get_or(&self, key: SettingKey, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }
}

/// Sanitizes `raw` for `key` and stores it. Returns the stored value.
///
/// # Errors
///
/// Propagates the store's write error.
pub fn save_setting(
    store: &dyn SettingsStore,
    key: SettingKey,
    raw: &str,
) -> Result<String, ConfigError> {
    let value = key.sanitize(raw);
    store.set(key, &value)?;
    tracing::info!(setting = %key, "setting updated");
    Ok(value)
}

#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemorySettingsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_values<'a>(values: impl IntoIterator<Item = (SettingKey, &'a str)>) -> Self {
        let values = values
            .into_iter()
            .map(|(k, v)| (k.storage_key(), v.to_string()))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: SettingKey) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key.storage_key())
            .cloned()
    }

    fn set(&self, key: SettingKey, value: &str) -> Result<(), ConfigError> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.storage_key(), value.to_string());
        Ok(())
    }
}

/// Settings persisted as a flat YAML mapping of storage key to value.
///
/// The whole file is rewritten on every save.
#[derive(Debug)]
pub struct YamlSettingsStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl YamlSettingsStore {
    /// Opens the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn open(path: &Path) -> Result<Self, ConfigError> {
        let values = match std::fs::read_to_string(path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_yaml::from_str::<BTreeMap<String, String>>(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "settings file not found; starting empty");
                BTreeMap::new()
            }
            Err(e) => {
                return Err(ConfigError::SettingsFileIo {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            values: RwLock::new(values),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::SettingsFileIo {
            path: self.path.display().to_string(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let yaml = serde_yaml::to_string(values)?;
        std::fs::write(&self.path, yaml).map_err(io_err)
    }
}

impl SettingsStore for YamlSettingsStore {
    fn get(&self, key: SettingKey) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key.storage_key())
            .cloned()
    }

    fn set(&self, key: SettingKey, value: &str) -> Result<(), ConfigError> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        let previous = values.insert(key.storage_key(), value.to_string());
        if let Err(e) = self.persist(&values) {
            match previous {
                Some(old) => values.insert(key.storage_key(), old),
                None => values.remove(&key.storage_key()),
            };
            return Err(e);
        }
        Ok(())
    }
}

/// All six settings resolved against their defaults.
///
/// Loaded once per event and handed to the payload builder.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct BrandSettings {
    pub brand_name: String,
    pub founders: String,
    pub about_brand: String,
    pub wp_base_url: String,
    pub wp_username: String,
    pub wp_app_password: String,
}

impl BrandSettings {
    /// `site_url` is the fallback for `wp_base_url`.
    #[must_use]
    pub fn load(store: &dyn SettingsStore, site_url: &str) -> Self {
        let get = |key: SettingKey| store.get_or(key, &key.default_value(site_url));
        Self {
            brand_name: get(SettingKey::BrandName),
            founders: get(SettingKey::Founders),
            about_brand: get(SettingKey::AboutBrand),
            wp_base_url: get(SettingKey::WpBaseUrl),
            wp_username: get(SettingKey::WpUsername),
            wp_app_password: get(SettingKey::WpAppPassword),
        }
    }

    #[must_use]
    pub fn value(&self, key: SettingKey) -> &str {
        match key {
            SettingKey::BrandName => &self.brand_name,
            SettingKey::Founders => &self.founders,
            SettingKey::AboutBrand => &self.about_brand,
            SettingKey::WpBaseUrl => &self.wp_base_url,
            SettingKey::WpUsername => &self.wp_username,
            SettingKey::WpAppPassword => &self.wp_app_password,
        }
    }

    /// Same values with the application password masked, for display.
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self {
            wp_app_password: redact(&self.wp_app_password),
            ..self.clone()
        }
    }
}

impl std::fmt::Debug for BrandSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrandSettings")
            .field("brand_name", &self.brand_name)
            .field("founders", &self.founders)
            .field("about_brand", &self.about_brand)
            .field("wp_base_url", &self.wp_base_url)
            .field("wp_username", &self.wp_username)
            .field("wp_app_password", &redact(&self.wp_app_password))
            .finish()
    }
}

fn redact(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "[redacted]".to_string()
    }
}
