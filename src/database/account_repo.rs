use sqlx::{sqlite::SqliteArguments, Arguments, SqlitePool};

use crate::models::{AccountRow, Role};

pub const SQL_FIND_ACCOUNT_BY_EMAIL: &str = r#"
SELECT
  id,
  email,
  name,
  role
FROM accounts
WHERE email = ?1
LIMIT 1
"#;

const SQL_INSERT_ACCOUNT: &str = r#"
INSERT INTO accounts (email, name, role)
VALUES (?1, ?2, ?3)
"#;

const SQL_LIST_ACCOUNTS: &str = r#"
SELECT
  id,
  email,
  name,
  role
FROM accounts
"#;

const SQL_UPDATE_ROLE: &str = r#"
UPDATE accounts
SET role = ?1
WHERE id = ?2
"#;

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> sqlx::Result<Option<AccountRow>> {
    sqlx::query_as::<_, AccountRow>(SQL_FIND_ACCOUNT_BY_EMAIL)
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn insert(
    pool: &SqlitePool,
    email: &str,
    name: Option<&str>,
    role: Role,
) -> sqlx::Result<i64> {
    let result = sqlx::query(SQL_INSERT_ACCOUNT)
        .bind(email)
        .bind(name)
        .bind(role)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Optional case-insensitive substring match on the display name.
pub async fn list(pool: &SqlitePool, search: Option<&str>) -> sqlx::Result<Vec<AccountRow>> {
    let mut sql = String::from(SQL_LIST_ACCOUNTS);
    let mut args = SqliteArguments::default();

    if let Some(needle) = search.filter(|s| !s.is_empty()) {
        sql.push_str(" WHERE name LIKE ?1 COLLATE NOCASE");
        args.add(format!("%{}%", needle));
    }
    sql.push_str(" ORDER BY id");

    sqlx::query_as_with::<_, AccountRow, _>(&sql, args)
        .fetch_all(pool)
        .await
}

/// Returns the number of rows touched (0 when the account id is unknown).
pub async fn update_role(pool: &SqlitePool, account_id: i64, role: Role) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_UPDATE_ROLE)
        .bind(role)
        .bind(account_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
