use axum_helpers::BasicAuthConfig;
use core_config::{FromEnv, database::DatabaseConfig, server::ServerConfig};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub basic_auth: BasicAuthConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Defaults: HOST=0.0.0.0, PORT=4000
        let database = DatabaseConfig::from_env()?; // Required - fails if DATABASE_URL unset
        let basic_auth = BasicAuthConfig::from_env()?; // Required - shared secret pair

        Ok(Self {
            server,
            database,
            basic_auth,
            environment,
        })
    }
}
