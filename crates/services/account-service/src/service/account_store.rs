//! Account store - owns user records and their invariants.
//!
//! Length checks run before anything touches the database. Uniqueness is left
//! to the repository's atomic constraint; nothing here reads first to decide
//! whether a username is free, and nothing retries.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{check_username, Password, User, UserProperties};

use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account store trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Create a user with a freshly hashed password and empty properties.
    ///
    /// Fails with `UsernameTooLong` or `UsernameTaken`.
    async fn create_user(&self, username: &str, password: &str) -> AppResult<User>;

    /// Find a user by exact username. Fails with `NotFound`.
    async fn find_user(&self, username: &str) -> AppResult<User>;

    /// Find a user by id. Fails with `NotFound`.
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Check a password against the user's stored hash. Never fails.
    fn validate_credentials(&self, user: &User, password: &str) -> bool;

    /// Replace the user's properties wholesale.
    async fn update_user_properties(&self, user: &User, properties: UserProperties)
        -> AppResult<()>;

    /// Rename the user. Fails with `UsernameTooLong` or `UsernameTaken`.
    async fn rename_user(&self, user: &User, new_name: &str) -> AppResult<()>;

    /// Replace the password hash. The caller has already proven the old password.
    async fn set_user_password(&self, user: &User, new_password: &str) -> AppResult<()>;

    /// Remove the user permanently. Fails with `NotFound` if already gone.
    async fn delete_user(&self, user: &User) -> AppResult<()>;
}

/// Concrete implementation of AccountStore using repository.
pub struct AccountManager {
    repo: Arc<dyn UserRepository>,
}

impl AccountManager {
    /// Create new account store instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl AccountStore for AccountManager {
    async fn create_user(&self, username: &str, password: &str) -> AppResult<User> {
        check_username(username)?;

        let password_hash = Password::new(password)?.into_string();
        let user = self.repo.create(username.to_string(), password_hash).await?;

        info!(user_id = %user.id, "Account created");
        Ok(user)
    }

    async fn find_user(&self, username: &str) -> AppResult<User> {
        self.repo.find_by_username(username).await?.ok_or_not_found()
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    fn validate_credentials(&self, user: &User, password: &str) -> bool {
        user.password().verify(password)
    }

    async fn update_user_properties(
        &self,
        user: &User,
        properties: UserProperties,
    ) -> AppResult<()> {
        self.repo.update_properties(user.id, properties).await
    }

    async fn rename_user(&self, user: &User, new_name: &str) -> AppResult<()> {
        check_username(new_name)?;

        self.repo.rename(user.id, new_name.to_string()).await?;

        info!(user_id = %user.id, "Account renamed");
        Ok(())
    }

    async fn set_user_password(&self, user: &User, new_password: &str) -> AppResult<()> {
        let password_hash = Password::new(new_password)?.into_string();
        self.repo.update_password_hash(user.id, password_hash).await?;

        info!(user_id = %user.id, "Password changed");
        Ok(())
    }

    async fn delete_user(&self, user: &User) -> AppResult<()> {
        self.repo.delete(user.id).await?;

        info!(user_id = %user.id, "Account deleted");
        Ok(())
    }
}
