use sqlx::SqlitePool;

use crate::models::SuccessStoryRow;

const SQL_INSERT_STORY: &str = r#"
INSERT INTO success_stories (self_biodata_id, partner_biodata_id, story, married_at)
VALUES (?1, ?2, ?3, ?4)
"#;

const SQL_LIST_STORIES: &str = r#"
SELECT
  id,
  self_biodata_id,
  partner_biodata_id,
  story,
  married_at
FROM success_stories
ORDER BY married_at DESC
"#;

pub async fn insert(
    pool: &SqlitePool,
    self_biodata_id: i64,
    partner_biodata_id: i64,
    story: &str,
    married_at: &str,
) -> sqlx::Result<i64> {
    let result = sqlx::query(SQL_INSERT_STORY)
        .bind(self_biodata_id)
        .bind(partner_biodata_id)
        .bind(story)
        .bind(married_at)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Reverse-chronological by marriage date.
pub async fn list(pool: &SqlitePool) -> sqlx::Result<Vec<SuccessStoryRow>> {
    sqlx::query_as::<_, SuccessStoryRow>(SQL_LIST_STORIES)
        .fetch_all(pool)
        .await
}
