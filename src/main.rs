use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use hotel_reservation::{
    config::AppConfig,
    infra::{
        database::PostgresDatabase,
        http_api::{AppState, start_http_api},
    },
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,hotel_reservation=debug")),
        )
        .init();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    info!(?config, "loaded configuration");

    let database = PostgresDatabase::new(
        &config.database_url,
        config.max_db_connections,
        config.pagination_defaults(),
    )
    .await
    .context("failed to connect to postgres")?;

    database
        .migrate()
        .await
        .context("failed to run database migrations")?;

    let state = AppState::new(
        Arc::new(database),
        Arc::new(config.token_issuer()),
        config.bcrypt_cost,
    );

    start_http_api(&config.listen_addr, state)
        .await
        .context("http api stopped with an error")?;

    Ok(())
}
