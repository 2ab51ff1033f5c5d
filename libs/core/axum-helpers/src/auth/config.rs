//! Configuration for the Basic Auth gate.
//!
//! Implements the `FromEnv` trait from `core_config`, following the same
//! pattern as `ServerConfig` and `DatabaseConfig`.

use core_config::{ConfigError, FromEnv, env_required};

/// Shared-secret Basic Auth configuration.
///
/// Loaded from environment variables:
/// - `BASIC_AUTH_USER` (required)
/// - `BASIC_AUTH_PASS` (required)
///
/// The same pair is used by the server gate and by clients issuing
/// requests.
#[derive(Clone, Debug)]
pub struct BasicAuthConfig {
    pub username: String,
    pub password: String,
}

impl BasicAuthConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl FromEnv for BasicAuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            username: env_required("BASIC_AUTH_USER")?,
            password: env_required("BASIC_AUTH_PASS")?,
        })
    }
}
