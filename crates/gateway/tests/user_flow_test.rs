//! End-to-end handler flows against in-memory SQLite and a temporary
//! userspace root.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::json;
use tempfile::TempDir;
use uuid::Uuid;

use account_service_lib::config::AccountServiceConfig;
use account_service_lib::infra::{FsUserspace, MockUserspace, Userspace};
use account_service_lib::service::{AccountStore, MockAccountStore};
use account_service_lib::AccountService;
use auth_service_lib::config::AuthServiceConfig;
use auth_service_lib::service::TokenIssuer;
use auth_service_lib::{bearer_authorization, build_gateway, BasicCredentials};
use common::{AppError, DatabaseConfig, JwtConfig, UserspaceConfig};
use domain::{User, UserProperties};
use gateway_lib::handlers;
use gateway_lib::state::AppState;

struct TestEnv {
    state: AppState,
    root: TempDir,
}

const SECRET: &str = "test-secret-key-for-testing-only-32chars";

fn auth_config() -> AuthServiceConfig {
    AuthServiceConfig {
        jwt: JwtConfig {
            secret: SECRET.to_string(),
            expiration_hours: 1,
        },
    }
}

async fn setup() -> TestEnv {
    let root = TempDir::new().unwrap();
    let config = AccountServiceConfig {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        userspace: UserspaceConfig {
            root: root.path().to_path_buf(),
        },
    };

    let service = AccountService::connect(&config).await.unwrap();
    let credentials = build_gateway(service.store.clone(), &auth_config()).unwrap();

    TestEnv {
        state: AppState::from_services(service, credentials),
        root,
    }
}

/// Same store, but userspace calls go to a mock.
async fn setup_with_userspace(userspace: MockUserspace) -> AppState {
    let env = setup().await;
    let userspace: Arc<dyn Userspace> = Arc::new(userspace);

    AppState::new(
        env.state.database.clone(),
        env.state.accounts.clone(),
        env.state.credentials.clone(),
        userspace,
    )
}

fn basic(username: &str, password: &str) -> String {
    BasicCredentials::new(username, password).to_authorization()
}

fn b64(text: &str) -> String {
    STANDARD.encode(text)
}

async fn login(state: &AppState, username: &str, password: &str) -> String {
    let token = handlers::issue_token(state, &basic(username, password))
        .await
        .unwrap();
    bearer_authorization(&token.access_token)
}

#[tokio::test]
async fn test_create_user_provisions_userspace() {
    let env = setup().await;

    let created = handlers::create_user(&env.state, &basic("alice", "pw1"))
        .await
        .unwrap();

    assert_eq!(created.username, "alice");
    let fs = FsUserspace::new(env.root.path());
    assert!(fs.path_for(created.id).is_dir());
}

#[tokio::test]
async fn test_create_duplicate_is_taken() {
    let env = setup().await;

    handlers::create_user(&env.state, &basic("alice", "pw1"))
        .await
        .unwrap();
    let result = handlers::create_user(&env.state, &basic("alice", "pw2")).await;

    assert!(matches!(result, Err(AppError::UsernameTaken)));
}

#[tokio::test]
async fn test_create_with_malformed_header_is_unauthorized() {
    let env = setup().await;

    let result = handlers::create_user(&env.state, "Basic %%%").await;
    assert!(matches!(result, Err(AppError::Unauthorized)));
}

#[tokio::test]
async fn test_failed_provisioning_removes_account() {
    let mut userspace = MockUserspace::new();
    userspace
        .expect_create_userspace()
        .times(1)
        .returning(|_| Err(AppError::userspace("disk full")));
    let state = setup_with_userspace(userspace).await;

    let result = handlers::create_user(&state, &basic("alice", "pw1")).await;

    assert!(matches!(result, Err(AppError::Userspace(_))));
    assert!(matches!(
        state.accounts.find_user("alice").await,
        Err(AppError::NotFound)
    ));
}

#[tokio::test]
async fn test_bearer_flow_alice_renamed_to_bob() {
    let env = setup().await;
    handlers::create_user(&env.state, &basic("alice", "pw1"))
        .await
        .unwrap();
    let bearer = login(&env.state, "alice", "pw1").await;

    handlers::rename_user(&env.state, &bearer, &b64("bob"))
        .await
        .unwrap();

    // The token follows the account, not the name.
    let me = handlers::authenticate(&env.state, &bearer).await.unwrap();
    assert_eq!(me.username, "bob");

    assert!(matches!(
        handlers::issue_token(&env.state, &basic("alice", "pw1")).await,
        Err(AppError::Unauthorized)
    ));
    assert!(handlers::issue_token(&env.state, &basic("bob", "pw1"))
        .await
        .is_ok());
    assert!(matches!(
        handlers::create_user(&env.state, &basic("bob", "pw2")).await,
        Err(AppError::UsernameTaken)
    ));
}

#[tokio::test]
async fn test_rename_with_bad_encoding_is_malformed() {
    let env = setup().await;
    handlers::create_user(&env.state, &basic("alice", "pw1"))
        .await
        .unwrap();
    let bearer = login(&env.state, "alice", "pw1").await;

    let result = handlers::rename_user(&env.state, &bearer, "not base64!").await;

    assert!(matches!(result, Err(AppError::MalformedPayload(_))));
}

#[tokio::test]
async fn test_colon_in_username_is_rejected() {
    let env = setup().await;

    // The header splits at the first ':', so this arrives as user "a".
    let header = format!("Basic {}", b64("a:b:pw"));
    let created = handlers::create_user(&env.state, &header).await.unwrap();
    assert_eq!(created.username, "a");

    assert!(matches!(
        BasicCredentials::try_new("a:b", "pw"),
        Err(AppError::MalformedPayload(_))
    ));

    let bearer = login(&env.state, "a", "b:pw").await;
    let result = handlers::rename_user(&env.state, &bearer, &b64("x:y")).await;
    assert!(matches!(result, Err(AppError::MalformedPayload(_))));

    // Still reachable through Basic, so the password can be changed.
    handlers::change_password(&env.state, &basic("a", "b:pw"), &b64("pw2"))
        .await
        .unwrap();
    assert!(handlers::issue_token(&env.state, &basic("a", "pw2"))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_unauthorized_before_payload_is_read() {
    let env = setup().await;

    let result = handlers::update_properties(&env.state, "Bearer forged", b"[1,2]").await;

    assert!(matches!(result, Err(AppError::Unauthorized)));
}

#[tokio::test]
async fn test_properties_flow() {
    let env = setup().await;
    handlers::create_user(&env.state, &basic("alice", "pw1"))
        .await
        .unwrap();
    let bearer = login(&env.state, "alice", "pw1").await;

    assert!(handlers::get_properties(&env.state, &bearer)
        .await
        .unwrap()
        .is_empty());

    let body = json!({"theme": "dark", "nested": {"a": [1, 2, 3]}});
    handlers::update_properties(&env.state, &bearer, body.to_string().as_bytes())
        .await
        .unwrap();

    let stored = handlers::get_properties(&env.state, &bearer).await.unwrap();
    assert_eq!(stored.into_value(), body);

    for bad in [&b"[1,2]"[..], b"\"text\"", b"{broken"] {
        assert!(matches!(
            handlers::update_properties(&env.state, &bearer, bad).await,
            Err(AppError::MalformedPayload(_))
        ));
    }
}

#[tokio::test]
async fn test_get_properties_reads_the_record_once() {
    let env = setup().await;

    let mut user = User::new(Uuid::new_v4(), "alice".into(), "hash".into());
    user.properties = UserProperties::try_from(json!({"theme": "dark"})).unwrap();
    let token = TokenIssuer::new(SECRET.to_string(), 1).issue(&user).unwrap();

    let stored = user.clone();
    let mut accounts = MockAccountStore::new();
    accounts
        .expect_get_user()
        .times(1)
        .returning(move |_| Ok(stored.clone()));
    let accounts: Arc<dyn AccountStore> = Arc::new(accounts);
    let credentials = build_gateway(accounts.clone(), &auth_config()).unwrap();
    let state = AppState::new(
        env.state.database.clone(),
        accounts,
        credentials,
        env.state.userspace.clone(),
    );

    let properties =
        handlers::get_properties(&state, &bearer_authorization(&token.access_token))
            .await
            .unwrap();
    assert_eq!(properties, user.properties);
}

#[tokio::test]
async fn test_change_password_requires_current_password() {
    let env = setup().await;
    handlers::create_user(&env.state, &basic("alice", "pw1"))
        .await
        .unwrap();

    assert!(matches!(
        handlers::change_password(&env.state, &basic("alice", "wrong"), &b64("pw2")).await,
        Err(AppError::Unauthorized)
    ));

    handlers::change_password(&env.state, &basic("alice", "pw1"), &b64("pw2"))
        .await
        .unwrap();

    assert!(matches!(
        handlers::issue_token(&env.state, &basic("alice", "pw1")).await,
        Err(AppError::Unauthorized)
    ));
    assert!(handlers::issue_token(&env.state, &basic("alice", "pw2"))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_delete_user_removes_userspace_and_revokes_token() {
    let env = setup().await;
    let created = handlers::create_user(&env.state, &basic("alice", "pw1"))
        .await
        .unwrap();
    let bearer = login(&env.state, "alice", "pw1").await;

    handlers::delete_user(&env.state, &bearer).await.unwrap();

    let fs = FsUserspace::new(env.root.path());
    assert!(!fs.path_for(created.id).exists());
    assert!(matches!(
        handlers::authenticate(&env.state, &bearer).await,
        Err(AppError::Unauthorized)
    ));
    assert!(matches!(
        handlers::issue_token(&env.state, &basic("alice", "pw1")).await,
        Err(AppError::Unauthorized)
    ));
    // The name is free again.
    assert!(handlers::create_user(&env.state, &basic("alice", "pw2"))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_teardown_failure_is_cleanup_incomplete() {
    let mut userspace = MockUserspace::new();
    userspace.expect_create_userspace().returning(|_| Ok(()));
    userspace
        .expect_delete_userspace()
        .times(1)
        .returning(|_| Err(AppError::userspace("device busy")));
    let state = setup_with_userspace(userspace).await;

    let created = handlers::create_user(&state, &basic("alice", "pw1"))
        .await
        .unwrap();
    let bearer = login(&state, "alice", "pw1").await;

    let result = handlers::delete_user(&state, &bearer).await;

    match result {
        Err(AppError::CleanupIncomplete { user_id, .. }) => assert_eq!(user_id, created.id),
        other => panic!("expected CleanupIncomplete, got {:?}", other),
    }
    // The record is gone even though storage remains.
    assert!(matches!(
        state.accounts.get_user(created.id).await,
        Err(AppError::NotFound)
    ));
}

#[tokio::test]
async fn test_retry_cleanup_refuses_live_accounts() {
    let env = setup().await;
    let created = handlers::create_user(&env.state, &basic("alice", "pw1"))
        .await
        .unwrap();

    let result = handlers::retry_cleanup(&env.state, created.id).await;
    assert!(matches!(result, Err(AppError::Userspace(_))));

    let fs = FsUserspace::new(env.root.path());
    assert!(fs.path_for(created.id).is_dir());
}

#[tokio::test]
async fn test_health_check() {
    let env = setup().await;

    let health = handlers::health_check(&env.state).await;
    assert!(health.is_healthy());
}
