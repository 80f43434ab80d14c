//! Query parameter and body decoding.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use common::{AppError, AppResult};
use domain::UserProperties;

/// Decode a base64-encoded UTF-8 text parameter (new names, new passwords).
pub fn decode_text_param(encoded: &str) -> AppResult<String> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| AppError::malformed(format!("parameter is not valid base64: {}", e)))?;

    String::from_utf8(bytes).map_err(|_| AppError::malformed("parameter is not valid UTF-8"))
}

/// Parse a properties update body. Anything but a JSON object is malformed.
pub fn properties_body(body: &[u8]) -> AppResult<UserProperties> {
    Ok(UserProperties::from_json_bytes(body)?)
}
