use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct FavouriteRow {
    pub id: i64,
    pub viewer_email: String,
    pub biodata_id: i64,
}
