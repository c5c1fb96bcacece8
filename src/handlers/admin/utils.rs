use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Parse an optional JSON body. An empty body reads as `T::default()` so that
/// missing fields surface as validation errors rather than parse errors.
pub fn parse_json_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::validation_error(format!("Invalid JSON body: {}", e)))
}
