use sqlx::SqlitePool;

/// Public projection used by the premium listing. Contact fields are not part
/// of this row on purpose.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct PremiumBiodataRow {
    pub biodata_id: i64,
    pub name: Option<String>,
    pub biodata_type: Option<String>,
    pub age: Option<i64>,
    pub division: Option<String>,
    pub occupation: Option<String>,
    pub image_url: Option<String>,
}

/// A success story joined with both referenced biodatas, for the admin review
/// surface.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct AdminStoryRow {
    pub id: i64,
    pub self_biodata_id: i64,
    pub self_biodata_type: Option<String>,
    pub partner_biodata_id: i64,
    pub partner_biodata_type: Option<String>,
    pub story: String,
    pub married_at: String,
}

/// Premium-role accounts joined to their biodata by owner email. Accounts
/// without a biodata drop out of the inner join. Youngest first, capped at 6.
const SQL_PREMIUM_LISTING: &str = r#"
SELECT
  b.biodata_id,
  b.name,
  b.biodata_type,
  b.age,
  b.division,
  b.occupation,
  b.image_url
FROM accounts a
INNER JOIN biodatas b ON b.email = a.email
WHERE a.role = 'premium'
ORDER BY b.age ASC
LIMIT 6
"#;

/// Stories whose self or partner sequence number resolves to no biodata are
/// excluded by the inner joins, not reported as errors.
const SQL_ADMIN_STORIES: &str = r#"
SELECT
  s.id,
  s.self_biodata_id,
  self_b.biodata_type AS self_biodata_type,
  s.partner_biodata_id,
  partner_b.biodata_type AS partner_biodata_type,
  s.story,
  s.married_at
FROM success_stories s
INNER JOIN biodatas self_b ON self_b.biodata_id = s.self_biodata_id
INNER JOIN biodatas partner_b ON partner_b.biodata_id = s.partner_biodata_id
ORDER BY s.married_at DESC
"#;

const SQL_COUNT_BY_TYPE: &str = r#"
SELECT COUNT(*) FROM biodatas WHERE biodata_type = ?1
"#;

const SQL_COUNT_PREMIUM_STATUS: &str = r#"
SELECT COUNT(*) FROM biodatas WHERE status = 'premium'
"#;

const SQL_TOTAL_REVENUE: &str = r#"
SELECT COALESCE(SUM(amount), 0) FROM payments
"#;

pub async fn premium_listing(pool: &SqlitePool) -> sqlx::Result<Vec<PremiumBiodataRow>> {
    sqlx::query_as::<_, PremiumBiodataRow>(SQL_PREMIUM_LISTING)
        .fetch_all(pool)
        .await
}

pub async fn admin_stories(pool: &SqlitePool) -> sqlx::Result<Vec<AdminStoryRow>> {
    sqlx::query_as::<_, AdminStoryRow>(SQL_ADMIN_STORIES)
        .fetch_all(pool)
        .await
}

pub async fn count_by_type(pool: &SqlitePool, biodata_type: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(SQL_COUNT_BY_TYPE)
        .bind(biodata_type)
        .fetch_one(pool)
        .await
}

pub async fn count_premium_status(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(SQL_COUNT_PREMIUM_STATUS)
        .fetch_one(pool)
        .await
}

/// Sum over every payment regardless of status.
pub async fn total_revenue(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(SQL_TOTAL_REVENUE)
        .fetch_one(pool)
        .await
}
