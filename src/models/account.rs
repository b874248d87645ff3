use serde::{Deserialize, Serialize};

/// Closed set of account roles. Every authorization decision matches on this
/// exhaustively, so adding a role is a compile-time-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Member,
    Premium,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::Member
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AccountRow {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
}
