//! Account service configuration.

use common::{DatabaseConfig, UserspaceConfig};

/// Account service configuration.
#[derive(Debug, Clone, Default)]
pub struct AccountServiceConfig {
    /// Backing store for user records
    pub database: DatabaseConfig,
    /// Where per-user storage lives
    pub userspace: UserspaceConfig,
}

impl AccountServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// `ACCOUNT_SERVICE_DATABASE_URL` takes precedence over `DATABASE_URL`.
    pub fn from_env() -> Self {
        Self {
            database: DatabaseConfig::from_env("ACCOUNT_SERVICE"),
            userspace: UserspaceConfig::from_env(),
        }
    }
}
