use sqlx::SqlitePool;

use crate::models::FavouriteRow;

const SQL_INSERT_FAVOURITE: &str = r#"
INSERT INTO favourites (viewer_email, biodata_id)
VALUES (?1, ?2)
"#;

const SQL_LIST_FAVOURITES: &str = r#"
SELECT
  id,
  viewer_email,
  biodata_id
FROM favourites
WHERE viewer_email = ?1
ORDER BY id
"#;

const SQL_DELETE_FAVOURITE: &str = r#"
DELETE FROM favourites
WHERE id = ?1
"#;

/// Duplicates are allowed: favouriting the same biodata twice creates two rows.
pub async fn insert(pool: &SqlitePool, viewer_email: &str, biodata_id: i64) -> sqlx::Result<i64> {
    let result = sqlx::query(SQL_INSERT_FAVOURITE)
        .bind(viewer_email)
        .bind(biodata_id)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn list_by_viewer(
    pool: &SqlitePool,
    viewer_email: &str,
) -> sqlx::Result<Vec<FavouriteRow>> {
    sqlx::query_as::<_, FavouriteRow>(SQL_LIST_FAVOURITES)
        .bind(viewer_email)
        .fetch_all(pool)
        .await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_DELETE_FAVOURITE)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
