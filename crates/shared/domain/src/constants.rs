//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Maximum username length, counted in characters.
///
/// Shared with every caller that validates usernames before reaching the store.
pub const MAX_USERNAME_LEN: usize = 32;

/// Separates username from password in Basic credentials, so never part of a username.
pub const USERNAME_FORBIDDEN_CHAR: char = ':';

// =============================================================================
// Authentication
// =============================================================================

/// Default bearer token lifetime in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization scheme for username/password credentials
pub const BASIC_SCHEME: &str = "Basic";

/// Authorization scheme for bearer tokens
pub const BEARER_SCHEME: &str = "Bearer";

/// Token type reported when a bearer token is issued
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
