use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Item not found: {0}")]
    NotFound(i64),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid input: {0}")]
    Validation(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

/// Convert ItemError to AppError for standardized error responses
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::Connection(msg) => AppError::ServiceUnavailable(msg),
            ItemError::NotFound(id) => AppError::NotFound(format!("Item {} not found", id)),
            ItemError::Store(msg) => AppError::Database(msg),
            ItemError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

// Losing the pool is an availability problem, everything else a failed statement.
impl From<DbErr> for ItemError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => ItemError::Connection(err.to_string()),
            other => ItemError::Store(other.to_string()),
        }
    }
}

impl From<DatabaseError> for ItemError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Backend(db_err) => db_err.into(),
            other => ItemError::Connection(other.to_string()),
        }
    }
}
