//! Command line front end for the account core.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use account_service_lib::config::AccountServiceConfig;
use auth_service_lib::config::AuthServiceConfig;
use auth_service_lib::{bearer_authorization, BasicCredentials};
use common::{AppError, AppResult};
use gateway_lib::handlers;
use gateway_lib::state::AppState;

#[derive(Parser)]
#[command(name = "arcos")]
#[command(about = "User account management")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Check database connectivity
    Health,
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[derive(Subcommand)]
enum UserAction {
    /// Create an account and its userspace
    Create {
        username: String,
        #[arg(long, env = "ARCOS_PASSWORD")]
        password: String,
    },
    /// Exchange a username and password for a bearer token
    Login {
        username: String,
        #[arg(long, env = "ARCOS_PASSWORD")]
        password: String,
    },
    /// Print the caller's properties
    Properties {
        #[arg(long, env = "ARCOS_TOKEN")]
        token: String,
    },
    /// Replace the caller's properties with a JSON object
    SetProperties {
        #[arg(long, env = "ARCOS_TOKEN")]
        token: String,
        json: String,
    },
    /// Rename the caller
    Rename {
        #[arg(long, env = "ARCOS_TOKEN")]
        token: String,
        new_name: String,
    },
    /// Change a password, proving the current one
    Passwd {
        username: String,
        #[arg(long, env = "ARCOS_PASSWORD")]
        password: String,
        #[arg(long)]
        new_password: String,
    },
    /// Delete the caller's account and userspace
    Delete {
        #[arg(long, env = "ARCOS_TOKEN")]
        token: String,
    },
    /// Retry userspace removal for a deleted account
    Cleanup { user_id: Uuid },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateAction::Up => account_service_lib::MigrateAction::Up,
                MigrateAction::Down => account_service_lib::MigrateAction::Down,
                MigrateAction::Status => account_service_lib::MigrateAction::Status,
                MigrateAction::Fresh => account_service_lib::MigrateAction::Fresh,
            };

            account_service_lib::run_migrations(migrate_action).await?;
        }
        Commands::User { action } => {
            let state = connect().await?;
            if let Err(e) = run_user_action(&state, action).await {
                error!(code = e.code(), "Command failed");
                eprintln!("error [{}]: {}", e.code(), e.user_message());
                std::process::exit(1);
            }
        }
        Commands::Health => {
            let state = connect().await?;
            let health = handlers::health_check(&state).await;
            println!("{}", serde_json::to_string_pretty(&health)?);
            if !health.is_healthy() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

async fn connect() -> AppResult<AppState> {
    let accounts = AccountServiceConfig::from_env();
    let auth = AuthServiceConfig::from_env()?;
    gateway_lib::build_state(&accounts, &auth).await
}

async fn run_user_action(state: &AppState, action: UserAction) -> AppResult<()> {
    match action {
        UserAction::Create { username, password } => {
            let header = BasicCredentials::try_new(username, password)?.to_authorization();
            let user = handlers::create_user(state, &header).await?;
            print_json(&user)?;
        }
        UserAction::Login { username, password } => {
            let header = BasicCredentials::try_new(username, password)?.to_authorization();
            let token = handlers::issue_token(state, &header).await?;
            print_json(&token)?;
        }
        UserAction::Properties { token } => {
            let properties = handlers::get_properties(state, &bearer_authorization(&token)).await?;
            print_json(&properties)?;
        }
        UserAction::SetProperties { token, json } => {
            handlers::update_properties(state, &bearer_authorization(&token), json.as_bytes())
                .await?;
        }
        UserAction::Rename { token, new_name } => {
            handlers::rename_user(
                state,
                &bearer_authorization(&token),
                &STANDARD.encode(new_name),
            )
            .await?;
        }
        UserAction::Passwd {
            username,
            password,
            new_password,
        } => {
            let header = BasicCredentials::try_new(username, password)?.to_authorization();
            handlers::change_password(state, &header, &STANDARD.encode(new_password)).await?;
        }
        UserAction::Delete { token } => {
            handlers::delete_user(state, &bearer_authorization(&token)).await?;
        }
        UserAction::Cleanup { user_id } => {
            handlers::retry_cleanup(state, user_id).await?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let rendered =
        serde_json::to_string_pretty(value).map_err(|e| AppError::internal(e.to_string()))?;
    println!("{}", rendered);
    Ok(())
}
