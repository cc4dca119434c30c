mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use verithrax_core::{SettingsStore, YamlSettingsStore};
use verithrax_dispatch::{Dispatcher, WebhookClient};

use crate::{
    api::{build_app, AppState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(verithrax_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let settings: Arc<dyn SettingsStore> =
        Arc::new(YamlSettingsStore::open(&config.settings_path)?);
    let client = WebhookClient::new(
        &config.webhook_url,
        config.webhook_timeout_secs,
        &config.user_agent,
    )?;
    let dispatcher = Arc::new(Dispatcher::new(client));

    let auth = AuthState::from_env(matches!(
        config.env,
        verithrax_core::Environment::Development
    ))?;
    let app = build_app(
        AppState {
            config: Arc::clone(&config),
            settings,
            dispatcher,
        },
        auth,
    );

    tracing::info!(
        bind_addr = %config.bind_addr,
        env = %config.env,
        settings_path = %config.settings_path.display(),
        "starting verithrax server"
    );
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
