//! Gateway Library
//!
//! Request-level operations over the account store and credential gateway:
//! credential parsing, payload decoding and userspace lifecycle.

pub mod extractors;
pub mod handlers;
pub mod state;

use tracing::info;

use account_service_lib::config::AccountServiceConfig;
use account_service_lib::AccountService;
use auth_service_lib::build_gateway;
use auth_service_lib::config::AuthServiceConfig;
use common::AppResult;

use crate::state::AppState;

/// Connect every service and assemble the handler state.
pub async fn build_state(
    accounts: &AccountServiceConfig,
    auth: &AuthServiceConfig,
) -> AppResult<AppState> {
    let service = AccountService::connect(accounts).await?;
    let credentials = build_gateway(service.store.clone(), auth)?;

    info!("Gateway state ready");
    Ok(AppState::from_services(service, credentials))
}
