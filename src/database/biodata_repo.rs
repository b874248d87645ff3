use serde::Deserialize;
use sqlx::{sqlite::SqliteArguments, Arguments, SqlitePool};

use crate::models::{BiodataRow, VisibilityStatus};

/// Client-supplied biodata fields for the upsert. Every field is optional:
/// on update, absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BiodataPayload {
    pub name: Option<String>,
    pub biodata_type: Option<String>,
    pub age: Option<i64>,
    pub division: Option<String>,
    pub occupation: Option<String>,
    pub image_url: Option<String>,
    pub mobile: Option<String>,
    pub contact_email: Option<String>,
}

/// Conjunctive directory filters; `None` means "no constraint".
#[derive(Debug, Clone, Default)]
pub struct BiodataFilters {
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
    pub biodata_type: Option<String>,
    pub division: Option<String>,
}

const BIODATA_COLUMNS: &str = r#"
  id,
  biodata_id,
  email,
  name,
  biodata_type,
  age,
  division,
  occupation,
  image_url,
  status,
  mobile,
  contact_email
"#;

const SQL_INSERT_BIODATA: &str = r#"
INSERT INTO biodatas (
  biodata_id,
  email,
  name,
  biodata_type,
  age,
  division,
  occupation,
  image_url,
  status,
  mobile,
  contact_email
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 'pending', ?9, ?10)
"#;

const SQL_MERGE_BIODATA: &str = r#"
UPDATE biodatas
SET
  name = COALESCE(?1, name),
  biodata_type = COALESCE(?2, biodata_type),
  age = COALESCE(?3, age),
  division = COALESCE(?4, division),
  occupation = COALESCE(?5, occupation),
  image_url = COALESCE(?6, image_url),
  mobile = COALESCE(?7, mobile),
  contact_email = COALESCE(?8, contact_email)
WHERE email = ?9
"#;

const SQL_COUNT_BIODATAS: &str = r#"
SELECT COUNT(*) FROM biodatas
"#;

const SQL_SET_STATUS: &str = r#"
UPDATE biodatas
SET status = ?1
WHERE id = ?2
"#;

fn select_biodatas(where_clause: &str) -> String {
    format!("SELECT {BIODATA_COLUMNS} FROM biodatas {where_clause}")
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> sqlx::Result<Option<BiodataRow>> {
    sqlx::query_as::<_, BiodataRow>(&select_biodatas("WHERE email = ?1 LIMIT 1"))
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Lookup by internal row id. Callers are responsible for rejecting malformed
/// ids before this point.
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<BiodataRow>> {
    sqlx::query_as::<_, BiodataRow>(&select_biodatas("WHERE id = ?1 LIMIT 1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Lookup by public sequence number. If the accepted assignment race ever
/// produced a duplicate, this returns the earliest-inserted row.
pub async fn find_by_biodata_id(
    pool: &SqlitePool,
    biodata_id: i64,
) -> sqlx::Result<Option<BiodataRow>> {
    sqlx::query_as::<_, BiodataRow>(&select_biodatas(
        "WHERE biodata_id = ?1 ORDER BY id LIMIT 1",
    ))
    .bind(biodata_id)
    .fetch_optional(pool)
    .await
}

pub async fn count(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(SQL_COUNT_BIODATAS)
        .fetch_one(pool)
        .await
}

pub async fn insert(
    pool: &SqlitePool,
    biodata_id: i64,
    email: &str,
    payload: &BiodataPayload,
) -> sqlx::Result<i64> {
    let result = sqlx::query(SQL_INSERT_BIODATA)
        .bind(biodata_id)
        .bind(email)
        .bind(&payload.name)
        .bind(&payload.biodata_type)
        .bind(payload.age)
        .bind(&payload.division)
        .bind(&payload.occupation)
        .bind(&payload.image_url)
        .bind(&payload.mobile)
        .bind(&payload.contact_email)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Partial overwrite: fields absent from the payload keep their stored value.
pub async fn merge_update(
    pool: &SqlitePool,
    email: &str,
    payload: &BiodataPayload,
) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_MERGE_BIODATA)
        .bind(&payload.name)
        .bind(&payload.biodata_type)
        .bind(payload.age)
        .bind(&payload.division)
        .bind(&payload.occupation)
        .bind(&payload.image_url)
        .bind(&payload.mobile)
        .bind(&payload.contact_email)
        .bind(email)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn set_status(
    pool: &SqlitePool,
    id: i64,
    status: VisibilityStatus,
) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_SET_STATUS)
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

fn push_filters(sql: &mut String, args: &mut SqliteArguments<'_>, filters: &BiodataFilters) {
    if let Some(min_age) = filters.min_age {
        sql.push_str(" AND age >= ?");
        args.add(min_age);
    }
    if let Some(max_age) = filters.max_age {
        sql.push_str(" AND age <= ?");
        args.add(max_age);
    }
    if let Some(biodata_type) = filters.biodata_type.clone() {
        sql.push_str(" AND biodata_type = ?");
        args.add(biodata_type);
    }
    if let Some(division) = filters.division.clone() {
        sql.push_str(" AND division = ?");
        args.add(division);
    }
}

/// Directory search: conjunction of the provided filters, insertion order.
/// `page`/`size` absent returns the full matching set, preserving the legacy
/// unpaginated list-all callers.
pub async fn search(
    pool: &SqlitePool,
    filters: &BiodataFilters,
    page: Option<i64>,
    size: Option<i64>,
) -> sqlx::Result<Vec<BiodataRow>> {
    let mut sql = select_biodatas("WHERE 1 = 1");
    let mut args = SqliteArguments::default();
    push_filters(&mut sql, &mut args, filters);
    sql.push_str(" ORDER BY id");

    if let Some(size) = size {
        sql.push_str(" LIMIT ? OFFSET ?");
        args.add(size);
        args.add(page.unwrap_or(0) * size);
    }

    sqlx::query_as_with::<_, BiodataRow, _>(&sql, args)
        .fetch_all(pool)
        .await
}

/// Total matching count for the same filter conjunction, ignoring pagination.
pub async fn count_filtered(pool: &SqlitePool, filters: &BiodataFilters) -> sqlx::Result<i64> {
    let mut sql = String::from("SELECT COUNT(*) FROM biodatas WHERE 1 = 1");
    let mut args = SqliteArguments::default();
    push_filters(&mut sql, &mut args, filters);

    sqlx::query_scalar_with::<_, i64, _>(&sql, args)
        .fetch_one(pool)
        .await
}
