//! Infrastructure layer - database and external services.

mod db;
pub mod migrations;
pub mod userspace;

pub use db::Database;
pub use migrations::Migrator;
pub use userspace::{FsUserspace, Userspace};

#[cfg(any(test, feature = "test-utils"))]
pub use userspace::MockUserspace;
