//! Credential resolution and token issuance.

mod gateway;
mod tokens;

pub use gateway::{CredentialGateway, Gateway};
pub use tokens::{Claims, TokenIssuer, TokenResponse};
