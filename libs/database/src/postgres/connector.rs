use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{RetryPolicy, retry_with_backoff};

/// Open a connection pool using the given configuration.
pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    let max = config.max_connections;
    let db = Database::connect(config.into_connect_options()).await?;
    info!(max_connections = max, "Connected to PostgreSQL");
    Ok(db)
}

/// Like [`connect_from_config`], but retries with backoff while the server is unreachable.
///
/// ```ignore
/// let db = connect_from_config_with_retry(PostgresConfig::from_env()?, RetryPolicy::default()).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    policy: RetryPolicy,
) -> Result<DatabaseConnection, DbErr> {
    retry_with_backoff(policy, || connect_from_config(config.clone())).await
}

/// Apply every pending migration of `M`.
///
/// `app_name` only labels the log lines.
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!("Running {} database migrations...", app_name);
    M::up(db, None).await?;
    info!("Migrations completed successfully for {}", app_name);
    Ok(())
}
