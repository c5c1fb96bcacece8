// POST /functions/v1/delete-user

use axum::{body::Bytes, extract::State, response::Json};
use serde_json::{json, Value};

use super::utils::parse_json_body;
use crate::error::ApiError;
use crate::middleware::BearerToken;
use crate::services::DeleteRequest;
use crate::state::AppState;

pub async fn delete_user(
    State(state): State<AppState>,
    bearer: BearerToken,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let request: DeleteRequest = parse_json_body(&body)?;
    state.admin.delete_user(bearer.as_deref(), request).await?;

    Ok(Json(json!({
        "success": true,
        "message": "User deleted successfully"
    })))
}
