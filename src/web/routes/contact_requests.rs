use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::models::PaymentRow;
use crate::services::contact_service;
use crate::web::error::ApiError;

/// GET /contact-request — pending transactions awaiting admin review.
pub async fn list_pending_handler(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<PaymentRow>>, ApiError> {
    let pending = contact_service::list_pending(&pool).await?;
    Ok(Json(pending))
}

/// PATCH /contact-request/:id — approve; repeat approvals are no-ops.
pub async fn approve_handler(
    State(pool): State<SqlitePool>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    contact_service::approve(&pool, &raw_id).await?;
    Ok(Json(json!({ "approved": true })))
}

/// DELETE /contact-request/:id — reject and remove permanently.
pub async fn reject_handler(
    State(pool): State<SqlitePool>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    contact_service::reject(&pool, &raw_id).await?;
    Ok(Json(json!({ "deleted": true })))
}
