//! DataHub Store - Main Entry Point
//!
//! Loads configuration, wires the application and loads the actor list once.

use anyhow::Context;
use datahub_store::app::application::{App, TOKEN_ENV, run_app};
use datahub_store::services::AccessToken;
use datahub_store::utils::config_store::load_config;
use datahub_store::utils::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("Failed to load configuration")?;
    let _log_guard = init_logging(&config.log).context("Failed to initialize logging")?;

    tracing::info!("Starting DataHub store client...");

    let app = App::bootstrap(config).context("Failed to bootstrap application")?;
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        app.sign_in(AccessToken::new(token, None));
    }

    let state = run_app(&app).await;
    tracing::info!(%state, "Finished");

    app.sign_out();
    Ok(())
}
