//! Account Service Library
//!
//! This crate owns user records: the account store, its SeaORM persistence
//! and the per-user filesystem storage collaborator.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use sea_orm::DbErr;
use tracing::info;

use crate::config::AccountServiceConfig;
use crate::infra::{Database, FsUserspace, Userspace};
use crate::repository::UserStore;
use crate::service::{AccountManager, AccountStore};

/// Constructed account components, ready to be injected into handlers.
#[derive(Clone)]
pub struct AccountService {
    pub database: Database,
    pub store: Arc<dyn AccountStore>,
    pub userspace: Arc<dyn Userspace>,
}

impl AccountService {
    /// Connect to the database (applying migrations) and wire the store.
    pub async fn connect(config: &AccountServiceConfig) -> Result<Self, DbErr> {
        let database = Database::connect(&config.database).await?;
        Ok(Self::from_database(database, config))
    }

    /// Wire the store on top of an already prepared database.
    pub fn from_database(database: Database, config: &AccountServiceConfig) -> Self {
        let user_repo = Arc::new(UserStore::new(database.get_connection()));
        let store = Arc::new(AccountManager::new(user_repo));
        let userspace = Arc::new(FsUserspace::from_config(&config.userspace));

        info!(
            userspace_root = %config.userspace.root.display(),
            "Account service ready"
        );

        Self {
            database,
            store,
            userspace,
        }
    }
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = AccountServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
