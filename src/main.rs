use anyhow::Context;
use tokio::net::TcpListener;

use serverprops::api::{self, AppState};
use serverprops::config::AppConfig;
use serverprops::core::properties::PropertyService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load();

    // Initialize logging
    let _log_guard = serverprops::core::logging::init(&config.logging);
    log::info!("{} v{} starting", serverprops::NAME, serverprops::VERSION);

    let service = PropertyService::from_config(&config).context("failed to build HTTP client")?;
    let app = api::router(AppState::new(service), config.server.gzip);

    let listener = TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    log::info!("Listening on http://{}", config.server.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("Shutting down");
        })
        .await
        .context("server error")?;

    Ok(())
}
