use anyhow::{Context, Result};
use dotenv::dotenv;
use shared::{
    config::{Config, ConnectionManager, ConnectionPool},
    utils::{Telemetry, init_logger},
};
use storefront::{handler::AppRouter, state::AppState};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let logger_provider = match &config.otel_endpoint {
        Some(endpoint) => Some(Telemetry::new("storefront", endpoint.clone()).init_logger()?),
        None => None,
    };

    let _guard = init_logger(logger_provider.as_ref(), "storefront")?;

    info!("Starting storefront initialization...");

    let db_pool = ConnectionManager::new_pool(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&db_pool)
            .await
            .context("Failed to migrate database")?;
    }

    let state = AppState::new(db_pool, &config)
        .await
        .context("Failed to create AppState")?;

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("🛑 Shutting down storefront...");

    if let Some(provider) = logger_provider {
        if let Err(e) = provider.shutdown() {
            error!("Failed to shutdown telemetry: {e}");
        }
    }

    Ok(())
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    info!("🗄️ Running database migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
