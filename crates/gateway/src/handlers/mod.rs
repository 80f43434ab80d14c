//! Request handlers.

pub mod health_handler;
pub mod token_handler;
pub mod user_handler;

pub use health_handler::{health_check, HealthResponse};
pub use token_handler::issue_token;
pub use user_handler::{
    authenticate, change_password, create_user, delete_user, get_properties, rename_user,
    retry_cleanup, update_properties,
};
