//! Token handlers.

use tracing::info;

use auth_service_lib::service::TokenResponse;
use auth_service_lib::BasicCredentials;
use common::AppResult;

use crate::state::AppState;

/// Exchange Basic credentials for a bearer token.
pub async fn issue_token(state: &AppState, authorization: &str) -> AppResult<TokenResponse> {
    let credentials = BasicCredentials::from_authorization(authorization)?;
    let token = state.credentials.issue_token(&credentials).await?;

    info!(username = %credentials.username, "Bearer token issued");
    Ok(token)
}
