//! Custom extractors for Axum handlers.
//!
//! Every rejection is an [`AppError`](crate::errors::AppError), so clients get the
//! standard `ErrorResponse` body instead of axum's plain-text defaults.

pub mod id_path;
pub mod query;
pub mod validated_json;

pub use id_path::IdPath;
pub use query::ApiQuery;
pub use validated_json::ValidatedJson;
