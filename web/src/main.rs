//! Repairdesk HTTP server.
//!
//! Without the `postgres` feature the server runs over the in-memory
//! repositories, which is useful for demos and local development; data
//! does not survive a restart.

use anyhow::Context as _;
use repairdesk_web::{AppState, ServerConfig, app_router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env();
    let app = build_app(&config).await?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "repairdesk server listening");

    axum::serve(listener, app).await.context("server exited")?;
    Ok(())
}

#[cfg(feature = "postgres")]
async fn build_app(config: &ServerConfig) -> anyhow::Result<axum::Router> {
    use repairdesk_service::RequestService;
    use repairdesk_service::stores::postgres::{PgDirectory, PgRequests};

    let url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required with the postgres feature")?;
    let pool = sqlx::PgPool::connect(url)
        .await
        .context("failed to connect to PostgreSQL")?;

    let directory = PgDirectory::new(pool.clone());
    directory.migrate().await.context("migration failed")?;

    let service = RequestService::new(directory, PgRequests::new(pool));
    Ok(app_router(AppState::new(service)))
}

#[cfg(not(feature = "postgres"))]
async fn build_app(_config: &ServerConfig) -> anyhow::Result<axum::Router> {
    use repairdesk_service::RequestService;
    use repairdesk_service::mocks::{MockDirectory, MockRequests};

    tracing::warn!("serving over the in-memory store; data will not survive restarts");
    let service = RequestService::new(MockDirectory::new(), MockRequests::new());
    Ok(app_router(AppState::new(service)))
}
