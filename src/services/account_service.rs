use sqlx::SqlitePool;
use tracing::info;

use crate::database::account_repo;
use crate::models::{AccountRow, Role};
use crate::web::error::ApiError;

/// Outcome of the idempotent sign-in insert: `inserted_id` is `None` when the
/// email was already registered, in which case the stored record (role
/// included) is left untouched.
#[derive(Debug, Clone, serde::Serialize)]
pub struct EnsureAccountOutcome {
    pub message: &'static str,
    pub inserted_id: Option<i64>,
}

pub async fn ensure_account(
    pool: &SqlitePool,
    email: &str,
    name: Option<&str>,
) -> Result<EnsureAccountOutcome, ApiError> {
    if account_repo::find_by_email(pool, email).await?.is_some() {
        return Ok(EnsureAccountOutcome {
            message: "user already exists",
            inserted_id: None,
        });
    }
    let id = account_repo::insert(pool, email, name, Role::Member).await?;
    info!(email, id, "account created");
    Ok(EnsureAccountOutcome {
        message: "user created",
        inserted_id: Some(id),
    })
}

pub async fn find_account(pool: &SqlitePool, email: &str) -> Result<AccountRow, ApiError> {
    account_repo::find_by_email(pool, email)
        .await?
        .ok_or(ApiError::NotFound)
}

pub async fn list_accounts(
    pool: &SqlitePool,
    search: Option<&str>,
) -> Result<Vec<AccountRow>, ApiError> {
    Ok(account_repo::list(pool, search).await?)
}

pub async fn set_role(pool: &SqlitePool, account_id: i64, role: Role) -> Result<(), ApiError> {
    let touched = account_repo::update_role(pool, account_id, role).await?;
    if touched == 0 {
        return Err(ApiError::NotFound);
    }
    info!(account_id, ?role, "account role updated");
    Ok(())
}

/// An absent account is simply not an admin; this mirrors the original
/// behavior of answering `false` rather than 404.
pub async fn is_admin(pool: &SqlitePool, email: &str) -> Result<bool, ApiError> {
    let account = account_repo::find_by_email(pool, email).await?;
    Ok(match account.map(|a| a.role) {
        Some(Role::Admin) => true,
        Some(Role::Member) | Some(Role::Premium) | None => false,
    })
}
