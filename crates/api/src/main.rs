use anyhow::{Context, Result};
use tracing::{info, warn};

use cms_api::app::create_app;
use cms_api::config::Config;
use cms_api::middleware::{init_metrics, logging::init_logging};
use shared::setup_check::check_setup;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    init_logging(&config.logging, "cms").context("failed to initialize logging")?;
    init_metrics().context("failed to install Prometheus recorder")?;

    info!("Starting CMS server v{}", env!("CARGO_PKG_VERSION"));

    let workspace_root = config.workspace_root();
    let private_config = config.private_config_path(&workspace_root);
    info!(
        workspace_root = %workspace_root.display(),
        private_config = %private_config.display(),
        "Resolved workspace"
    );

    let status = check_setup(&private_config);
    if !status.is_complete() {
        warn!(
            status = %status,
            wizard_url = %config.setup.wizard_url,
            "Setup incomplete, requests will be redirected to the setup wizard"
        );
    }

    let addr = config.socket_addr()?;
    let app = create_app(config, &workspace_root);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
