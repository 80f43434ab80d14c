//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user record, username rules, the properties payload and password hashing.

pub mod constants;
pub mod error;
pub mod password;
pub mod properties;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use properties::UserProperties;
pub use user::{check_username, User, UserResponse};
