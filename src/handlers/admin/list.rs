// POST /functions/v1/list-users

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::BearerToken;
use crate::state::AppState;

/// Every account merged with its profile row. Requires an administrator.
pub async fn list_users(State(state): State<AppState>, bearer: BearerToken) -> Result<Json<Value>, ApiError> {
    let users = state.admin.list_users(bearer.as_deref()).await?;
    Ok(Json(json!({ "users": users })))
}
