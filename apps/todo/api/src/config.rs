use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // DATABASE_URL or DB_NAME/DB_USER/DB_PASSWORD
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=30080, API_BASE_PATH=/todo/api

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_with_database_url() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://todo:secret@db:5432/todo")),
                ("PORT", None),
                ("API_BASE_PATH", None),
                ("APP_ENV", Some("production")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "todo_api");
                assert_eq!(config.database.url(), "postgres://todo:secret@db:5432/todo");
                assert_eq!(config.server.port, 30080);
                assert_eq!(config.server.base_path, "/todo/api");
                assert!(config.environment.is_production());
            },
        );
    }

    #[test]
    fn test_from_env_requires_database_settings() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", None::<&str>),
                ("DB_NAME", None),
                ("DB_USER", None),
                ("DB_PASSWORD", None),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}
