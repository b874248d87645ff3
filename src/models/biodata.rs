use serde::{Deserialize, Serialize};

/// Visibility tier of a biodata. Premium implies approved and is surfaced in
/// the premium listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum VisibilityStatus {
    Pending,
    Approved,
    Premium,
}

/// Full biodata row, private contact fields included. Public listings must
/// project their own field subset instead of serializing this directly.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BiodataRow {
    pub id: i64,
    /// Public sequence number, assigned once at creation. Distinct from the
    /// internal `id`; success stories and payments reference this one.
    pub biodata_id: i64,
    pub email: String,
    pub name: Option<String>,
    pub biodata_type: Option<String>,
    pub age: Option<i64>,
    pub division: Option<String>,
    pub occupation: Option<String>,
    pub image_url: Option<String>,
    pub status: VisibilityStatus,
    pub mobile: Option<String>,
    pub contact_email: Option<String>,
}
