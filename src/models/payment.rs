use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Approved,
}

/// A contact-request transaction: a payer asking to unlock the contact fields
/// of the biodata with public sequence number `biodata_id`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PaymentRow {
    pub id: i64,
    pub email: String,
    pub amount: i64,
    pub currency: String,
    pub biodata_id: i64,
    pub status: PaymentStatus,
}
