use std::path::Path;

use clap::Subcommand;
use verithrax_core::{save_setting, BrandSettings, SettingKey, YamlSettingsStore};

#[derive(Debug, Subcommand)]
pub enum SettingsCommands {
    /// Print every setting with defaults applied (password masked)
    Show,
    /// Sanitize and store one setting
    Set {
        /// Setting name, e.g. `brand_name` or `verithrax_brand_name`
        key: SettingKey,
        value: String,
    },
}

pub(crate) fn run_settings(
    settings_path: &Path,
    site_url: &str,
    command: SettingsCommands,
) -> anyhow::Result<()> {
    let store = YamlSettingsStore::open(settings_path)?;
    match command {
        SettingsCommands::Show => {
            let settings = BrandSettings::load(&store, site_url).redacted();
            print!("{}", format_settings(&settings));
        }
        SettingsCommands::Set { key, value } => {
            let stored = save_setting(&store, key, &value)?;
            let shown = if key.is_secret() { "[redacted]" } else { stored.as_str() };
            println!("{key} = {shown:?} ({})", settings_path.display());
        }
    }
    Ok(())
}

pub(crate) fn format_settings(settings: &BrandSettings) -> String {
    let width = SettingKey::ALL
        .iter()
        .map(|k| k.name().len())
        .max()
        .unwrap_or(0);
    SettingKey::ALL
        .into_iter()
        .map(|key| format!("{:<width$}  {}\n", key.name(), settings.value(key)))
        .collect()
}
