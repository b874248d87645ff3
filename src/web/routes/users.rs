use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::models::{AccountRow, Role};
use crate::services::account_service;
use crate::web::error::ApiError;
use crate::web::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize)]
pub struct CreateAccountBody {
    pub email: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleBody {
    pub role: Role,
}

/// POST /users — idempotent account creation keyed by email.
pub async fn create_account_handler(
    State(pool): State<SqlitePool>,
    Json(body): Json<CreateAccountBody>,
) -> Result<Json<account_service::EnsureAccountOutcome>, ApiError> {
    let outcome = account_service::ensure_account(&pool, &body.email, body.name.as_deref()).await?;
    Ok(Json(outcome))
}

/// GET /users — admin listing with an optional name search.
pub async fn list_accounts_handler(
    State(pool): State<SqlitePool>,
    Query(query): Query<ListAccountsQuery>,
) -> Result<Json<Vec<AccountRow>>, ApiError> {
    let accounts = account_service::list_accounts(&pool, query.search.as_deref()).await?;
    Ok(Json(accounts))
}

/// GET /users/:email
pub async fn get_account_handler(
    State(pool): State<SqlitePool>,
    Path(email): Path<String>,
) -> Result<Json<AccountRow>, ApiError> {
    let account = account_service::find_account(&pool, &email).await?;
    Ok(Json(account))
}

/// PATCH /users/:id — admin-only role change.
pub async fn update_role_handler(
    State(pool): State<SqlitePool>,
    Path(raw_id): Path<String>,
    Json(body): Json<UpdateRoleBody>,
) -> Result<Json<Value>, ApiError> {
    let id = raw_id
        .parse::<i64>()
        .map_err(|_| ApiError::InvalidArgument(format!("invalid account id: {raw_id}")))?;
    account_service::set_role(&pool, id, body.role).await?;
    Ok(Json(json!({ "modified": true })))
}

/// GET /users/admin/:email — a caller may only ask about their own admin
/// flag; anyone else's is forbidden.
pub async fn admin_flag_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
    Path(email): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if email != auth_user.email {
        return Err(ApiError::Forbidden);
    }
    let admin = account_service::is_admin(&pool, &email).await?;
    Ok(Json(json!({ "admin": admin })))
}
