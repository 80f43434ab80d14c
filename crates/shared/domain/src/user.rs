//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{MAX_USERNAME_LEN, USERNAME_FORBIDDEN_CHAR};
use crate::error::{DomainError, DomainResult};
use crate::password::Password;
use crate::properties::UserProperties;

/// Enforce the username rules shared by create and rename.
///
/// Length is counted in characters, not bytes. Matching is exact and
/// case-sensitive, so no normalization happens here. A `:` would make the
/// name unrepresentable in Basic credentials.
pub fn check_username(username: &str) -> DomainResult<()> {
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(DomainError::username_too_long());
    }
    if username.contains(USERNAME_FORBIDDEN_CHAR) {
        return Err(DomainError::malformed(format!(
            "username must not contain '{}'",
            USERNAME_FORBIDDEN_CHAR
        )));
    }
    Ok(())
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Stable identifier, also the userspace key
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub properties: UserProperties,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with empty properties
    pub fn new(id: Uuid, username: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            password_hash,
            properties: UserProperties::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Stored password hash as a verifiable value object
    pub fn password(&self) -> Password {
        Password::from_hash(self.password_hash.as_str())
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// Unique user identifier
    pub id: Uuid,
    pub username: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            created_at: user.created_at,
        }
    }
}
