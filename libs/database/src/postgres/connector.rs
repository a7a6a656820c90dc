use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityName, EntityTrait, Schema,
};
use sea_orm_migration::SchemaManager;
use tracing::info;

use super::PostgresConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry_with_backoff};

/// Connect using a `PostgresConfig`
pub async fn connect_from_config(config: PostgresConfig) -> DatabaseResult<DatabaseConnection> {
    info!(url = %config.redacted_url(), "Connecting to database");
    connect_with_options(config.into_connect_options()).await
}

/// Connect with explicit SeaORM options
pub async fn connect_with_options(options: ConnectOptions) -> DatabaseResult<DatabaseConnection> {
    let db = Database::connect(options)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;
    info!(backend = ?db.get_database_backend(), "Successfully connected to database");
    Ok(db)
}

/// Connect from config, retrying with exponential backoff.
///
/// `None` uses the default policy (3 retries from 100ms).
///
/// ```ignore
/// let config = PostgresConfig::from_env()?;
/// let db = connect_from_config_with_retry(config, Some(RetryConfig::startup())).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<DatabaseConnection> {
    info!(url = %config.redacted_url(), "Connecting to database");
    let options = config.into_connect_options();
    retry_with_backoff(
        || connect_with_options(options.clone()),
        retry_config.unwrap_or_default(),
    )
    .await
}

/// Declare the table backing `entity` unless it already exists.
///
/// The statement is derived from the entity definition for the connected backend,
/// so the same call works on PostgreSQL and SQLite.
pub async fn create_table_if_not_exists<E>(db: &DatabaseConnection, entity: E) -> DatabaseResult<()>
where
    E: EntityTrait,
{
    let table = entity.table_name().to_owned();
    let backend = db.get_database_backend();
    let mut statement = Schema::new(backend).create_table_from_entity(entity);
    statement.if_not_exists();

    SchemaManager::new(db).create_table(statement).await?;

    info!(table = %table, "Table declared");
    Ok(())
}
