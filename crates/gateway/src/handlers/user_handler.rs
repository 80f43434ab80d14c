//! User handlers.
//!
//! Each handler takes the raw `Authorization` header value plus typed inputs
//! and returns a typed result. Mapping `AppError` kinds onto a transport is
//! left to whoever calls these.

use tracing::{error, info, warn};

use auth_service_lib::{bearer_token, BasicCredentials};
use common::{AppError, AppResult};
use domain::{User, UserProperties, UserResponse};
use uuid::Uuid;

use crate::extractors::{decode_text_param, properties_body};
use crate::state::AppState;

/// Resolve a bearer `Authorization` header to a user.
pub async fn authenticate(state: &AppState, authorization: &str) -> AppResult<User> {
    let token = bearer_token(authorization)?;
    state.credentials.resolve_bearer(token).await
}

/// Create an account from Basic credentials and provision its userspace.
///
/// If provisioning fails the new account is removed again, so a caller never
/// sees an account without storage.
pub async fn create_user(state: &AppState, authorization: &str) -> AppResult<UserResponse> {
    let credentials = BasicCredentials::from_authorization(authorization)?;

    let user = state
        .accounts
        .create_user(&credentials.username, credentials.password())
        .await?;

    if let Err(e) = state.userspace.create_userspace(user.id).await {
        warn!(user_id = %user.id, "Userspace provisioning failed, removing account: {}", e);
        if let Err(rollback) = state.accounts.delete_user(&user).await {
            error!(
                user_id = %user.id,
                "Account left without userspace, removal failed: {}",
                rollback
            );
        }
        return Err(e);
    }

    info!(user_id = %user.id, "User created with userspace");
    Ok(UserResponse::from(user))
}

/// Read the caller's properties.
///
/// Bearer resolution already re-reads the record, so its properties are current.
pub async fn get_properties(state: &AppState, authorization: &str) -> AppResult<UserProperties> {
    let user = authenticate(state, authorization).await?;
    Ok(user.properties)
}

/// Replace the caller's properties with a JSON object body.
pub async fn update_properties(
    state: &AppState,
    authorization: &str,
    body: &[u8],
) -> AppResult<()> {
    let user = authenticate(state, authorization).await?;
    let properties = properties_body(body)?;

    state.accounts.update_user_properties(&user, properties).await
}

/// Delete the caller's account, then tear down its userspace.
///
/// A teardown failure is reported as `CleanupIncomplete`; the account stays
/// deleted.
pub async fn delete_user(state: &AppState, authorization: &str) -> AppResult<()> {
    let user = authenticate(state, authorization).await?;

    state.accounts.delete_user(&user).await?;

    state
        .userspace
        .delete_userspace(user.id)
        .await
        .map_err(|e| {
            error!(user_id = %user.id, "Userspace teardown failed after account deletion: {}", e);
            AppError::CleanupIncomplete {
                user_id: user.id,
                reason: e.to_string(),
            }
        })
}

/// Retry userspace teardown for an account reported as `CleanupIncomplete`.
pub async fn retry_cleanup(state: &AppState, user_id: Uuid) -> AppResult<()> {
    // Only orphaned userspaces may be removed.
    match state.accounts.get_user(user_id).await {
        Ok(_) => {
            return Err(AppError::userspace(format!(
                "account {} still exists",
                user_id
            )))
        }
        Err(AppError::NotFound) => {}
        Err(e) => return Err(e),
    }

    state.userspace.delete_userspace(user_id).await?;
    info!(%user_id, "Userspace cleanup completed");
    Ok(())
}

/// Rename the caller. `new_name` is base64-encoded UTF-8.
pub async fn rename_user(state: &AppState, authorization: &str, new_name: &str) -> AppResult<()> {
    let user = authenticate(state, authorization).await?;
    let new_name = decode_text_param(new_name)?;

    state.accounts.rename_user(&user, &new_name).await
}

/// Change the password of the user proven by Basic credentials.
/// `new_password` is base64-encoded UTF-8.
pub async fn change_password(
    state: &AppState,
    authorization: &str,
    new_password: &str,
) -> AppResult<()> {
    let credentials = BasicCredentials::from_authorization(authorization)?;
    let user = state.credentials.resolve_basic(&credentials).await?;
    let new_password = decode_text_param(new_password)?;

    state.accounts.set_user_password(&user, &new_password).await
}
