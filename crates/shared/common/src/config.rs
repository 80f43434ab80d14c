//! Shared configuration structures.
//!
//! Each struct loads itself from environment variables with sensible
//! development defaults. Services compose the pieces they need.

use std::env;
use std::path::PathBuf;

use domain::{DEFAULT_JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Database configuration.
#[derive(Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .finish()
    }
}

impl DatabaseConfig {
    /// Load from `<PREFIX>_DATABASE_URL`, falling back to `DATABASE_URL`.
    pub fn from_env(prefix: &str) -> Self {
        let defaults = Self::default();
        Self {
            url: env::var(format!("{}_DATABASE_URL", prefix))
                .or_else(|_| env::var("DATABASE_URL"))
                .unwrap_or(defaults.url),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(defaults.max_connections),
            min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(defaults.min_connections),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://arcos.db?mode=rwc".to_string(),
            max_connections: 10,
            min_connections: 1,
        }
    }
}

/// JWT configuration for bearer tokens.
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    #[serde(skip_serializing)]
    pub secret: String,
    pub expiration_hours: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl JwtConfig {
    /// Load from `JWT_SECRET` and `JWT_EXPIRATION_HOURS`.
    ///
    /// The secret is required and must be at least `MIN_JWT_SECRET_LENGTH` long.
    pub fn from_env() -> AppResult<Self> {
        let secret = env::var("JWT_SECRET").map_err(|_| {
            AppError::config(format!(
                "JWT_SECRET must be set (minimum {} characters)",
                MIN_JWT_SECRET_LENGTH
            ))
        })?;

        let config = Self {
            secret,
            expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the secret length and the token lifetime.
    pub fn validate(&self) -> AppResult<()> {
        if self.secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::config(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }
        if self.expiration_hours <= 0 {
            return Err(AppError::config("JWT_EXPIRATION_HOURS must be positive"));
        }
        Ok(())
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
        }
    }
}

/// Userspace (per-user storage) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserspaceConfig {
    /// Directory under which one subdirectory per user id is kept
    pub root: PathBuf,
}

impl UserspaceConfig {
    /// Load from `USERSPACE_ROOT`.
    pub fn from_env() -> Self {
        Self {
            root: env::var("USERSPACE_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| Self::default().root),
        }
    }
}

impl Default for UserspaceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./userspace"),
        }
    }
}
