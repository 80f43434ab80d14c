//! Credential gateway - turns presented credentials into a user.

use async_trait::async_trait;
use std::sync::Arc;

use account_service_lib::service::AccountStore;
use common::{AppError, AppResult};
use domain::{Password, User};

use super::tokens::{TokenIssuer, TokenResponse};
use crate::credentials::BasicCredentials;

/// Credential gateway trait for dependency injection.
///
/// Implementations only read from the account store.
#[async_trait]
pub trait CredentialGateway: Send + Sync {
    /// Resolve a username/password pair. Fails with `Unauthorized`.
    async fn resolve_basic(&self, credentials: &BasicCredentials) -> AppResult<User>;

    /// Resolve a bearer token. Fails with `Unauthorized`.
    async fn resolve_bearer(&self, token: &str) -> AppResult<User>;

    /// Prove a password and hand out a bearer token for that user.
    async fn issue_token(&self, credentials: &BasicCredentials) -> AppResult<TokenResponse>;
}

/// Concrete implementation of CredentialGateway backed by an AccountStore.
pub struct Gateway {
    accounts: Arc<dyn AccountStore>,
    tokens: TokenIssuer,
    /// Verified against when the username is unknown, so that lookups of
    /// missing and existing users take comparable time.
    dummy: Password,
}

impl Gateway {
    pub fn new(accounts: Arc<dyn AccountStore>, tokens: TokenIssuer) -> AppResult<Self> {
        Ok(Self {
            accounts,
            tokens,
            dummy: Password::new("")?,
        })
    }
}

#[async_trait]
impl CredentialGateway for Gateway {
    async fn resolve_basic(&self, credentials: &BasicCredentials) -> AppResult<User> {
        let user = match self.accounts.find_user(&credentials.username).await {
            Ok(user) => user,
            Err(AppError::NotFound) => {
                let _ = self.dummy.verify(credentials.password());
                return Err(AppError::Unauthorized);
            }
            Err(e) => return Err(e),
        };

        if !self
            .accounts
            .validate_credentials(&user, credentials.password())
        {
            return Err(AppError::Unauthorized);
        }

        Ok(user)
    }

    async fn resolve_bearer(&self, token: &str) -> AppResult<User> {
        let claims = self.tokens.verify(token)?;

        // Re-read the user so deleted accounts lose their tokens.
        match self.accounts.get_user(claims.sub).await {
            Ok(user) => Ok(user),
            Err(AppError::NotFound) => Err(AppError::Unauthorized),
            Err(e) => Err(e),
        }
    }

    async fn issue_token(&self, credentials: &BasicCredentials) -> AppResult<TokenResponse> {
        let user = self.resolve_basic(credentials).await?;
        self.tokens.issue(&user)
    }
}
