// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::AuthFailure;
use crate::providers::ProviderError;

/// HTTP API error with appropriate status codes and client-facing messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    ValidationError(String),

    // 401 Unauthorized
    MissingCredential,
    InvalidCredential,

    // 403 Forbidden
    NotAdmin,

    // 500 Internal Server Error (provider message passed through verbatim)
    ProvisioningError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingCredential => StatusCode::UNAUTHORIZED,
            ApiError::InvalidCredential => StatusCode::UNAUTHORIZED,
            ApiError::NotAdmin => StatusCode::FORBIDDEN,
            ApiError::ProvisioningError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-facing error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationError(msg) => msg,
            ApiError::MissingCredential => "Missing authorization header",
            ApiError::InvalidCredential => "Invalid or expired token",
            ApiError::NotAdmin => "Unauthorized - admin access required",
            ApiError::ProvisioningError(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

impl ApiError {
    pub fn validation_error(message: impl Into<String>) -> Self {
        ApiError::ValidationError(message.into())
    }

    pub fn provisioning_error(message: impl Into<String>) -> Self {
        ApiError::ProvisioningError(message.into())
    }
}

impl From<AuthFailure> for ApiError {
    fn from(failure: AuthFailure) -> Self {
        match failure {
            AuthFailure::MissingCredential => ApiError::MissingCredential,
            AuthFailure::InvalidCredential => ApiError::InvalidCredential,
            AuthFailure::NotAdmin => ApiError::NotAdmin,
        }
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        tracing::error!("Provider error: {}", err);
        ApiError::ProvisioningError(err.message().to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
