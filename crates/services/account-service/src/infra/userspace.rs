//! Per-user filesystem storage.
//!
//! The account store never calls this itself. The orchestrating layer
//! provisions a userspace after a create and tears it down after a delete.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};
use uuid::Uuid;

use common::{AppError, AppResult, UserspaceConfig};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Provisioning contract keyed solely by the user id.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Userspace: Send + Sync {
    /// Create the storage area for a user
    async fn create_userspace(&self, id: Uuid) -> AppResult<()>;

    /// Remove the storage area for a user and everything in it
    async fn delete_userspace(&self, id: Uuid) -> AppResult<()>;
}

/// Directory-per-user implementation rooted at a configured path.
pub struct FsUserspace {
    root: PathBuf,
}

impl FsUserspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &UserspaceConfig) -> Self {
        Self::new(config.root.clone())
    }

    /// Directory holding a given user's files.
    pub fn path_for(&self, id: Uuid) -> PathBuf {
        self.root.join(id.to_string())
    }
}

#[async_trait]
impl Userspace for FsUserspace {
    async fn create_userspace(&self, id: Uuid) -> AppResult<()> {
        let path = self.path_for(id);
        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|e| io_error("create", &path, e))?;

        debug!(%id, path = %path.display(), "Userspace created");
        Ok(())
    }

    async fn delete_userspace(&self, id: Uuid) -> AppResult<()> {
        let path = self.path_for(id);
        match tokio::fs::remove_dir_all(&path).await {
            Ok(()) => {
                debug!(%id, path = %path.display(), "Userspace deleted");
                Ok(())
            }
            // Nothing left to clean up.
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(%id, path = %path.display(), "Userspace already absent");
                Ok(())
            }
            Err(e) => Err(io_error("delete", &path, e)),
        }
    }
}

fn io_error(action: &str, path: &Path, err: io::Error) -> AppError {
    AppError::userspace(format!(
        "failed to {} userspace at {}: {}",
        action,
        path.display(),
        err
    ))
}
