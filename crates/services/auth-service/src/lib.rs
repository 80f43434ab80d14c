//! Auth Service Library
//!
//! Resolves the two supported credential schemes into a user:
//! - Basic: username and password, re-proven on every call
//! - Bearer: an opaque token issued after a successful Basic resolution
//!
//! Nothing here mutates the account store.

pub mod config;
pub mod credentials;
pub mod service;

use std::sync::Arc;

use account_service_lib::service::AccountStore;
use common::AppResult;

use crate::config::AuthServiceConfig;
use crate::service::{CredentialGateway, Gateway, TokenIssuer};

pub use credentials::{bearer_authorization, bearer_token, BasicCredentials};

/// Build the credential gateway on top of an account store.
pub fn build_gateway(
    accounts: Arc<dyn AccountStore>,
    config: &AuthServiceConfig,
) -> AppResult<Arc<dyn CredentialGateway>> {
    config.jwt.validate()?;
    let tokens = TokenIssuer::new(config.jwt.secret.clone(), config.jwt.expiration_hours);
    Ok(Arc::new(Gateway::new(accounts, tokens)?))
}
