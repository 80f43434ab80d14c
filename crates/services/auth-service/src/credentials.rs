//! `Authorization` header parsing.
//!
//! Any malformed header resolves to `Unauthorized`; callers never learn which
//! part of the header was wrong.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use common::{AppError, AppResult};
use domain::{BASIC_SCHEME, BEARER_SCHEME, USERNAME_FORBIDDEN_CHAR};

/// Username and password presented directly by the caller.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    password: String,
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Build credentials that will survive a trip through a Basic header.
    ///
    /// A username containing `:` would be split differently on parsing, so it
    /// is rejected as `MalformedPayload`.
    pub fn try_new(username: impl Into<String>, password: impl Into<String>) -> AppResult<Self> {
        let username = username.into();
        if username.contains(USERNAME_FORBIDDEN_CHAR) {
            return Err(AppError::malformed(format!(
                "username must not contain '{}'",
                USERNAME_FORBIDDEN_CHAR
            )));
        }
        Ok(Self::new(username, password))
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Parse `Basic base64(username:password)`.
    ///
    /// The username ends at the first `:`; the password may contain more.
    pub fn from_authorization(header: &str) -> AppResult<Self> {
        let encoded = scheme_payload(header, BASIC_SCHEME)?;
        let decoded = STANDARD
            .decode(encoded)
            .map_err(|_| AppError::Unauthorized)?;
        let decoded = String::from_utf8(decoded).map_err(|_| AppError::Unauthorized)?;

        let (username, password) = decoded.split_once(':').ok_or(AppError::Unauthorized)?;
        Ok(Self::new(username, password))
    }

    /// Render as an `Authorization` header value.
    pub fn to_authorization(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        format!("{} {}", BASIC_SCHEME, STANDARD.encode(raw))
    }
}

/// Extract the token from `Bearer <token>`.
pub fn bearer_token(header: &str) -> AppResult<&str> {
    scheme_payload(header, BEARER_SCHEME)
}

/// Render a token as an `Authorization` header value.
pub fn bearer_authorization(token: &str) -> String {
    format!("{} {}", BEARER_SCHEME, token)
}

fn scheme_payload<'a>(header: &'a str, scheme: &str) -> AppResult<&'a str> {
    let (given, payload) = header.trim().split_once(' ').ok_or(AppError::Unauthorized)?;
    if !given.eq_ignore_ascii_case(scheme) {
        return Err(AppError::Unauthorized);
    }

    let payload = payload.trim();
    if payload.is_empty() {
        return Err(AppError::Unauthorized);
    }
    Ok(payload)
}
