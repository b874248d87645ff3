use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::database::favourite_repo;
use crate::models::FavouriteRow;
use crate::web::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateFavouriteBody {
    pub viewer_email: String,
    pub biodata_id: i64,
}

/// POST /favourites — no uniqueness check; favouriting twice stores twice.
pub async fn create_handler(
    State(pool): State<SqlitePool>,
    Json(body): Json<CreateFavouriteBody>,
) -> Result<Json<Value>, ApiError> {
    let id = favourite_repo::insert(&pool, &body.viewer_email, body.biodata_id).await?;
    Ok(Json(json!({ "inserted_id": id })))
}

/// GET /favourites/:email — the viewer's favourites.
pub async fn list_handler(
    State(pool): State<SqlitePool>,
    Path(email): Path<String>,
) -> Result<Json<Vec<FavouriteRow>>, ApiError> {
    let favourites = favourite_repo::list_by_viewer(&pool, &email).await?;
    Ok(Json(favourites))
}

/// DELETE /favourites/:id
pub async fn delete_handler(
    State(pool): State<SqlitePool>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = raw_id
        .parse::<i64>()
        .map_err(|_| ApiError::InvalidArgument(format!("invalid favourite id: {raw_id}")))?;
    let deleted = favourite_repo::delete(&pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(Json(json!({ "deleted": true })))
}
