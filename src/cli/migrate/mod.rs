//! Migrate command - creates the PostgreSQL schema and exits

use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::user::PostgresUserRepository;

/// Create the users table in the configured database
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    let pool = crate::connect_postgres(&config).await?;
    PostgresUserRepository::new(pool).ensure_schema().await?;

    info!("Schema is up to date");

    Ok(())
}
