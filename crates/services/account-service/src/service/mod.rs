//! Account business logic.

mod account_store;

pub use account_store::{AccountManager, AccountStore};

#[cfg(any(test, feature = "test-utils"))]
pub use account_store::MockAccountStore;
