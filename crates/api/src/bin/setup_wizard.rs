use anyhow::{Context, Result};
use tracing::info;

use cms_api::config::Config;
use cms_api::middleware::{init_metrics, logging::init_logging};
use cms_api::services::ensure_blank_config;
use cms_api::wizard_app::create_wizard_app;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    init_logging(&config.logging, "setup-wizard").context("failed to initialize logging")?;
    init_metrics().context("failed to install Prometheus recorder")?;

    info!("Starting setup wizard v{}", env!("CARGO_PKG_VERSION"));

    let workspace_root = config.workspace_root();
    let private_config = config.private_config_path(&workspace_root);
    if ensure_blank_config(&private_config).await? {
        info!(path = %private_config.display(), "Created blank private config");
    }

    let addr = config.wizard_socket_addr()?;
    let app = create_wizard_app(config, &workspace_root);

    info!("Setup wizard listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
