use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::services::token_service;
use crate::web::error::ApiError;
use crate::web::AppState;

#[derive(Debug, Deserialize)]
pub struct JwtRequest {
    pub email: String,
    pub name: Option<String>,
}

/// POST /jwt — sign a 365-day token for the supplied identity. Issuing is
/// open by design: the token only asserts an identity claim, every privileged
/// operation re-checks the stored role.
pub async fn issue_token_handler(
    State(state): State<AppState>,
    Json(body): Json<JwtRequest>,
) -> Result<Json<Value>, ApiError> {
    let token = token_service::issue(&state.jwt_secret, &body.email, body.name.as_deref())?;
    Ok(Json(json!({ "token": token })))
}
