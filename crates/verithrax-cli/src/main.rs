mod product;
mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::settings::SettingsCommands;

#[derive(Debug, Parser)]
#[command(name = "verithrax-cli")]
#[command(about = "Verithrax product webhook command line interface")]
struct Cli {
    /// Settings file written by the admin form
    #[arg(
        long,
        global = true,
        env = "VERITHRAX_SETTINGS_PATH",
        default_value = "./config/settings.yaml"
    )]
    settings_path: PathBuf,

    /// Site home URL, the fallback for `wp_base_url`
    #[arg(
        long,
        global = true,
        env = "VERITHRAX_SITE_URL",
        default_value = "http://localhost"
    )]
    site_url: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the webhook payload a product save would produce
    Payload {
        /// Product snapshot as JSON
        #[arg(long)]
        product: PathBuf,
        /// Treat the save as an update of an existing product
        #[arg(long)]
        update: bool,
    },
    /// Send the webhook once for a product
    Dispatch {
        /// Product snapshot as JSON
        #[arg(long, conflicts_with = "id", required_unless_present = "id")]
        product: Option<PathBuf>,
        /// Product id to read from the store API
        #[arg(long)]
        id: Option<i64>,
        /// Treat the save as an update of an existing product
        #[arg(long)]
        update: bool,
    },
    /// Read or change brand and credential settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(std::env::var("VERITHRAX_LOG_LEVEL").unwrap_or_else(|_| "warn".into()))
    })?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let site_url = cli.site_url.trim_end_matches('/');
    match cli.command {
        Some(Commands::Payload { product, update }) => {
            product::run_payload(&cli.settings_path, site_url, &product, update)?;
        }
        Some(Commands::Dispatch {
            product,
            id,
            update,
        }) => {
            let mut config = verithrax_core::load_app_config_from_env()?;
            config.settings_path.clone_from(&cli.settings_path);
            site_url.clone_into(&mut config.site_url);
            let target = match (product, id) {
                (Some(path), _) => product::DispatchTarget::File(path),
                (None, Some(id)) => product::DispatchTarget::StoreId(id),
                (None, None) => anyhow::bail!("either --product or --id is required"),
            };
            product::run_dispatch(&config, target, update).await?;
        }
        Some(Commands::Settings { command }) => {
            settings::run_settings(&cli.settings_path, site_url, command)?;
        }
        None => println!("verithrax-cli ready; see --help"),
    }

    Ok(())
}
