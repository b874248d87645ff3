use axum::{extract::State, Json};
use sqlx::SqlitePool;

use crate::services::reporting_service;
use crate::services::reporting_service::AdminStats;
use crate::web::error::ApiError;

/// GET /admin-stats — dashboard figures. Five independent reads; see
/// `reporting_service::admin_stats` for the consistency caveat.
pub async fn admin_stats_handler(
    State(pool): State<SqlitePool>,
) -> Result<Json<AdminStats>, ApiError> {
    let stats = reporting_service::admin_stats(&pool).await?;
    Ok(Json(stats))
}
