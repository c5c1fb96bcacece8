// POST /functions/v1/invite-user

use axum::{
    body::Bytes,
    extract::State,
    http::{header::ORIGIN, HeaderMap},
};

use super::utils::parse_json_body;
use crate::middleware::{ApiResponse, ApiResult, BearerToken};
use crate::models::ProvisionedAccount;
use crate::services::InviteRequest;
use crate::state::AppState;

/// Create an account directly when a password is supplied, otherwise send an
/// email invitation whose link returns to the caller's origin.
///
/// Expected Input:
/// ```json
/// { "email": "a@b.com", "name": "a", "role": "vocals", "user_level": 1, "password": "optional" }
/// ```
pub async fn invite_user(
    State(state): State<AppState>,
    bearer: BearerToken,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<ProvisionedAccount> {
    let request: InviteRequest = parse_json_body(&body)?;
    let origin = headers.get(ORIGIN).and_then(|v| v.to_str().ok());

    let provisioned = state.admin.invite_or_create(bearer.as_deref(), request, origin).await?;
    Ok(ApiResponse::success(provisioned))
}
