//! PostgreSQL connector and utilities
//!
//! Connection management, schema declaration and health checks on top of SeaORM.
//! The helpers take a plain `DatabaseConnection`, so they also work against the
//! SQLite connections used in tests.

mod config;
mod connector;
mod health;

pub use config::PostgresConfig;
pub use connector::{
    connect_from_config, connect_from_config_with_retry, connect_with_options,
    create_table_if_not_exists,
};
pub use health::check_health;

// Re-export SeaORM types for convenience
pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
