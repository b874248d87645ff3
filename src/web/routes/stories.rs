use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::database::stats_repo::AdminStoryRow;
use crate::database::success_story_repo;
use crate::models::SuccessStoryRow;
use crate::services::reporting_service;
use crate::web::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateStoryBody {
    pub self_biodata_id: i64,
    pub partner_biodata_id: i64,
    pub story: String,
    pub married_at: String,
}

/// POST /success-story — written once, never edited.
pub async fn create_handler(
    State(pool): State<SqlitePool>,
    Json(body): Json<CreateStoryBody>,
) -> Result<Json<Value>, ApiError> {
    let id = success_story_repo::insert(
        &pool,
        body.self_biodata_id,
        body.partner_biodata_id,
        &body.story,
        &body.married_at,
    )
    .await?;
    Ok(Json(json!({ "inserted_id": id })))
}

/// GET /success-story — newest marriages first.
pub async fn list_handler(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<SuccessStoryRow>>, ApiError> {
    let stories = success_story_repo::list(&pool).await?;
    Ok(Json(stories))
}

/// GET /admin-success-story — stories joined with both biodatas for review.
pub async fn admin_stories_handler(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<AdminStoryRow>>, ApiError> {
    let stories = reporting_service::admin_stories(&pool).await?;
    Ok(Json(stories))
}
