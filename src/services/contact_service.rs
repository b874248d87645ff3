use sqlx::SqlitePool;
use tracing::info;

use crate::database::payment_repo;
use crate::database::payment_repo::PaymentWithContactRow;
use crate::models::PaymentRow;
use crate::web::error::ApiError;

/// Contact-unlock workflow over payment transactions.
///
/// States are {pending, approved}; deletion is the terminal rejection. A
/// payer may see a biodata's private contact fields exactly while an approved
/// transaction exists for the (payer, biodata) pair, and every check re-reads
/// the store rather than trusting an earlier decision.

/// Entry point: the client reports a charge that already went through the
/// payment gateway. The request starts pending until an admin reviews it.
pub async fn create_request(
    pool: &SqlitePool,
    payer_email: &str,
    amount: i64,
    currency: &str,
    biodata_id: i64,
) -> Result<i64, ApiError> {
    let id = payment_repo::insert(pool, payer_email, amount, currency, biodata_id).await?;
    info!(payer_email, biodata_id, amount, "contact request recorded");
    Ok(id)
}

pub async fn list_pending(pool: &SqlitePool) -> Result<Vec<PaymentRow>, ApiError> {
    Ok(payment_repo::list_pending(pool).await?)
}

/// pending -> approved. Approving an already-approved transaction succeeds
/// silently; only an unknown id fails.
pub async fn approve(pool: &SqlitePool, raw_id: &str) -> Result<(), ApiError> {
    let id = parse_id(raw_id)?;
    let touched = payment_repo::approve(pool, id).await?;
    if touched == 0 {
        return Err(ApiError::NotFound);
    }
    info!(id, "contact request approved");
    Ok(())
}

/// Rejection removes the record permanently; no audit trail is kept.
pub async fn reject(pool: &SqlitePool, raw_id: &str) -> Result<(), ApiError> {
    let id = parse_id(raw_id)?;
    let touched = payment_repo::delete(pool, id).await?;
    if touched == 0 {
        return Err(ApiError::NotFound);
    }
    info!(id, "contact request rejected");
    Ok(())
}

pub async fn is_unlocked(
    pool: &SqlitePool,
    payer_email: &str,
    biodata_id: i64,
) -> Result<bool, ApiError> {
    Ok(payment_repo::exists_approved(pool, payer_email, biodata_id).await?)
}

/// The payer's own request list; contact fields of each target biodata are
/// present only where the transaction is approved.
pub async fn list_for_payer(
    pool: &SqlitePool,
    payer_email: &str,
) -> Result<Vec<PaymentWithContactRow>, ApiError> {
    Ok(payment_repo::list_by_payer_with_contact(pool, payer_email).await?)
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::InvalidArgument(format!("invalid contact request id: {raw}")))
}
