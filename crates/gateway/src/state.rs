//! Application state for dependency injection.

use std::sync::Arc;

use account_service_lib::infra::{Database, Userspace};
use account_service_lib::service::AccountStore;
use account_service_lib::AccountService;
use auth_service_lib::service::CredentialGateway;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub accounts: Arc<dyn AccountStore>,
    pub credentials: Arc<dyn CredentialGateway>,
    pub userspace: Arc<dyn Userspace>,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        database: Database,
        accounts: Arc<dyn AccountStore>,
        credentials: Arc<dyn CredentialGateway>,
        userspace: Arc<dyn Userspace>,
    ) -> Self {
        Self {
            database,
            accounts,
            credentials,
            userspace,
        }
    }

    /// Assemble state from a wired account service.
    pub fn from_services(accounts: AccountService, credentials: Arc<dyn CredentialGateway>) -> Self {
        Self::new(
            accounts.database,
            accounts.store,
            credentials,
            accounts.userspace,
        )
    }
}
