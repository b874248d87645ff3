use serde::Serialize;

/// Immutable once written. Both ids are public biodata sequence numbers.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SuccessStoryRow {
    pub id: i64,
    pub self_biodata_id: i64,
    pub partner_biodata_id: i64,
    pub story: String,
    pub married_at: String,
}
