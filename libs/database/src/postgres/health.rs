use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use tracing::debug;

use crate::common::DatabaseError;

/// Run `SELECT 1` against the connection.
///
/// Used by the readiness probe; the statement is built for whichever backend the
/// connection talks to.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    debug!("Running database health check");

    let stmt = Statement::from_string(db.get_database_backend(), "SELECT 1".to_owned());
    db.query_one_raw(stmt)
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))?;

    debug!("Database health check passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postgres::connect_with_options;
    use sea_orm::ConnectOptions;

    async fn sqlite() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1).sqlx_logging(false);
        connect_with_options(options).await.unwrap()
    }

    #[tokio::test]
    async fn test_check_health_on_live_connection() {
        let db = sqlite().await;
        assert!(check_health(&db).await.is_ok());
    }

    #[tokio::test]
    async fn test_check_health_after_close() {
        let db = sqlite().await;
        let probe = db.clone();
        db.close().await.unwrap();

        let err = check_health(&probe).await.unwrap_err();
        assert!(matches!(err, DatabaseError::HealthCheckFailed(_)));
    }
}
