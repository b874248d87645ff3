use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::database::biodata_repo::BiodataPayload;
use crate::database::stats_repo::PremiumBiodataRow;
use crate::models::{BiodataRow, VisibilityStatus};
use crate::services::{biodata_service, reporting_service};
use crate::services::biodata_service::{SearchQuery, SearchResult, UpsertOutcome};
use crate::web::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct UpsertBiodataBody {
    pub email: String,
    #[serde(flatten)]
    pub payload: BiodataPayload,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusBody {
    pub status: VisibilityStatus,
}

/// GET /biodatas — filtered, paginated directory search.
pub async fn search_handler(
    State(pool): State<SqlitePool>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResult>, ApiError> {
    let result = biodata_service::search(&pool, &query).await?;
    Ok(Json(result))
}

/// PUT /biodatas — upsert keyed by the owner email in the body.
pub async fn upsert_handler(
    State(pool): State<SqlitePool>,
    Json(body): Json<UpsertBiodataBody>,
) -> Result<Json<UpsertOutcome>, ApiError> {
    let outcome = biodata_service::upsert_by_owner(&pool, &body.email, &body.payload).await?;
    Ok(Json(outcome))
}

/// GET /biodata-count
pub async fn count_handler(State(pool): State<SqlitePool>) -> Result<Json<Value>, ApiError> {
    let count = biodata_service::count(&pool).await?;
    Ok(Json(json!({ "count": count })))
}

/// GET /premium-biodatas — at most 6, youngest first, public fields only.
pub async fn premium_handler(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<PremiumBiodataRow>>, ApiError> {
    let listing = reporting_service::premium_listing(&pool).await?;
    Ok(Json(listing))
}

/// GET /biodatas/:email — profile by owner.
pub async fn by_email_handler(
    State(pool): State<SqlitePool>,
    Path(email): Path<String>,
) -> Result<Json<BiodataRow>, ApiError> {
    let biodata = biodata_service::find_by_owner(&pool, &email).await?;
    Ok(Json(biodata))
}

/// GET /biodata-details/:id — profile by internal id, authenticated.
pub async fn details_handler(
    State(pool): State<SqlitePool>,
    Path(raw_id): Path<String>,
) -> Result<Json<BiodataRow>, ApiError> {
    let biodata = biodata_service::details(&pool, &raw_id).await?;
    Ok(Json(biodata))
}

/// PATCH /biodatas/status/:id — admin visibility change.
pub async fn set_status_handler(
    State(pool): State<SqlitePool>,
    Path(raw_id): Path<String>,
    Json(body): Json<SetStatusBody>,
) -> Result<Json<Value>, ApiError> {
    biodata_service::set_status(&pool, &raw_id, body.status).await?;
    Ok(Json(json!({ "modified": true })))
}

/// PATCH /biodata/make-premium/:id
pub async fn make_premium_handler(
    State(pool): State<SqlitePool>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    biodata_service::make_premium(&pool, &raw_id).await?;
    Ok(Json(json!({ "modified": true })))
}
