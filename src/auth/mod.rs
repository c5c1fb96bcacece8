use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{CallerIdentity, UserLevel};

pub mod gate;

pub use gate::PrivilegeGate;

/// Audience the platform stamps on signed-in user tokens
pub const AUTHENTICATED_AUDIENCE: &str = "authenticated";

/// Claims carried by a platform access token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    pub aud: String,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid access token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("Token subject is not an account id: {0}")]
    InvalidSubject(String),
}

/// Verify an HS256 access token against the platform's signing secret
pub fn verify_access_token(token: &str, secret: &str) -> Result<CallerIdentity, TokenError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[AUTHENTICATED_AUDIENCE]);

    let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
    let claims = token_data.claims;

    let id = Uuid::parse_str(&claims.sub).map_err(|_| TokenError::InvalidSubject(claims.sub.clone()))?;

    Ok(CallerIdentity {
        id,
        email: claims.email,
    })
}

/// Why the privilege gate refused a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("missing bearer credential")]
    MissingCredential,

    #[error("bearer credential could not be resolved")]
    InvalidCredential,

    #[error("caller is not an administrator")]
    NotAdmin,
}

/// Resolved caller for one request. Never cached across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    pub account_id: Uuid,
    pub email: Option<String>,
    pub user_level: UserLevel,
}
