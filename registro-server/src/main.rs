use anyhow::Context;
use std::sync::Arc;

// ri-utilizziamo le funzioni e strutture definite in lib.rs
use registro_server::config::ServerConfig;
use registro_server::logging::init_logging;
use registro_server::routes::router;
use registro_server::{open_store, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configurazione dalle variabili d'ambiente (PORT, BIND_ADDR, DATABASE_URL, CLIENT_URL, LOG_FORMAT)
    let config = ServerConfig::from_env().context("read configuration")?;
    init_logging(config.log_format);

    // Store costruito qui e passato agli handler tramite lo stato
    let store = open_store(&config.database_url).await.context("open user store")?;
    let state = Arc::new(AppState::new(store).with_allowed_origin(config.allowed_origin.clone()));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .context("bind tcp listener")?;
    tracing::info!(addr = %config.bind_addr, "server running");
    axum::serve(listener, app.into_make_service())
        .await
        .context("server shutdown")?;

    Ok(())
}
