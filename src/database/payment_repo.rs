use sqlx::SqlitePool;

use crate::models::{PaymentRow, PaymentStatus};

/// A payment row joined with the target biodata's contact fields. The contact
/// columns are NULL unless the transaction is approved, so serializing this
/// row never leaks contact data for pending requests.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct PaymentWithContactRow {
    pub id: i64,
    pub email: String,
    pub amount: i64,
    pub currency: String,
    pub biodata_id: i64,
    pub status: PaymentStatus,
    pub biodata_name: Option<String>,
    pub mobile: Option<String>,
    pub contact_email: Option<String>,
}

const PAYMENT_COLUMNS: &str = r#"
  id,
  email,
  amount,
  currency,
  biodata_id,
  status
"#;

const SQL_INSERT_PAYMENT: &str = r#"
INSERT INTO payments (email, amount, currency, biodata_id, status)
VALUES (?1, ?2, ?3, ?4, 'pending')
"#;

/// Contact fields come through only for approved transactions; the unlock
/// decision is re-evaluated from current row state on every read.
const SQL_LIST_PAYMENTS_WITH_CONTACT: &str = r#"
SELECT
  p.id,
  p.email,
  p.amount,
  p.currency,
  p.biodata_id,
  p.status,
  b.name AS biodata_name,
  CASE WHEN p.status = 'approved' THEN b.mobile END AS mobile,
  CASE WHEN p.status = 'approved' THEN b.contact_email END AS contact_email
FROM payments p
LEFT JOIN biodatas b ON b.biodata_id = p.biodata_id
WHERE p.email = ?1
ORDER BY p.id
"#;

const SQL_APPROVE_PAYMENT: &str = r#"
UPDATE payments
SET status = 'approved'
WHERE id = ?1
"#;

const SQL_DELETE_PAYMENT: &str = r#"
DELETE FROM payments
WHERE id = ?1
"#;

const SQL_UNLOCKED: &str = r#"
SELECT EXISTS (
  SELECT 1
  FROM payments
  WHERE email = ?1
    AND biodata_id = ?2
    AND status = 'approved'
)
"#;

fn select_payments(where_clause: &str) -> String {
    format!("SELECT {PAYMENT_COLUMNS} FROM payments {where_clause}")
}

pub async fn insert(
    pool: &SqlitePool,
    email: &str,
    amount: i64,
    currency: &str,
    biodata_id: i64,
) -> sqlx::Result<i64> {
    let result = sqlx::query(SQL_INSERT_PAYMENT)
        .bind(email)
        .bind(amount)
        .bind(currency)
        .bind(biodata_id)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<PaymentRow>> {
    sqlx::query_as::<_, PaymentRow>(&select_payments("WHERE id = ?1 LIMIT 1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_pending(pool: &SqlitePool) -> sqlx::Result<Vec<PaymentRow>> {
    sqlx::query_as::<_, PaymentRow>(&select_payments("WHERE status = 'pending' ORDER BY id"))
        .fetch_all(pool)
        .await
}

pub async fn list_by_payer_with_contact(
    pool: &SqlitePool,
    email: &str,
) -> sqlx::Result<Vec<PaymentWithContactRow>> {
    sqlx::query_as::<_, PaymentWithContactRow>(SQL_LIST_PAYMENTS_WITH_CONTACT)
        .bind(email)
        .fetch_all(pool)
        .await
}

/// Re-approving an already-approved row touches it again and reports success;
/// only an unknown id yields 0 rows.
pub async fn approve(pool: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_APPROVE_PAYMENT)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_DELETE_PAYMENT)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn exists_approved(
    pool: &SqlitePool,
    email: &str,
    biodata_id: i64,
) -> sqlx::Result<bool> {
    let unlocked: i64 = sqlx::query_scalar(SQL_UNLOCKED)
        .bind(email)
        .bind(biodata_id)
        .fetch_one(pool)
        .await?;
    Ok(unlocked != 0)
}
