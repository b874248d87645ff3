use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::info;

use crate::database::biodata_repo::{self, BiodataFilters, BiodataPayload};
use crate::models::{BiodataRow, VisibilityStatus};
use crate::web::error::ApiError;

/// Query parameters of the directory search. The parameter names are the
/// platform's legacy wire names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "minAge")]
    pub min_age: Option<i64>,
    #[serde(rename = "maxAge")]
    pub max_age: Option<i64>,
    #[serde(rename = "biodataType")]
    pub biodata_type: Option<String>,
    pub division: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub biodatas: Vec<BiodataRow>,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct UpsertOutcome {
    pub created: bool,
    pub id: i64,
}

impl SearchQuery {
    fn filters(&self) -> BiodataFilters {
        BiodataFilters {
            min_age: self.min_age,
            max_age: self.max_age,
            biodata_type: self.biodata_type.clone(),
            division: self.division.clone(),
        }
    }
}

/// One profile per owner email. A second upsert for the same owner merges the
/// payload into the stored row; the sequence number keeps its first-assigned
/// value. New rows get sequence = current count + 1; the count read and the
/// insert are not one atomic step, which is the accepted assignment race.
pub async fn upsert_by_owner(
    pool: &SqlitePool,
    email: &str,
    payload: &BiodataPayload,
) -> Result<UpsertOutcome, ApiError> {
    if let Some(existing) = biodata_repo::find_by_email(pool, email).await? {
        biodata_repo::merge_update(pool, email, payload).await?;
        return Ok(UpsertOutcome {
            created: false,
            id: existing.id,
        });
    }

    let sequence = biodata_repo::count(pool).await? + 1;
    let id = biodata_repo::insert(pool, sequence, email, payload).await?;
    info!(email, sequence, "biodata created");
    Ok(UpsertOutcome { created: true, id })
}

pub async fn search(pool: &SqlitePool, query: &SearchQuery) -> Result<SearchResult, ApiError> {
    let filters = query.filters();
    let biodatas = biodata_repo::search(pool, &filters, query.page, query.size).await?;
    let count = biodata_repo::count_filtered(pool, &filters).await?;
    Ok(SearchResult { biodatas, count })
}

pub async fn count(pool: &SqlitePool) -> Result<i64, ApiError> {
    Ok(biodata_repo::count(pool).await?)
}

pub async fn find_by_owner(pool: &SqlitePool, email: &str) -> Result<BiodataRow, ApiError> {
    biodata_repo::find_by_email(pool, email)
        .await?
        .ok_or(ApiError::NotFound)
}

/// Path ids come in as raw strings; anything that is not an integer is a
/// malformed id (400), while a well-formed id with no row is a 404.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::InvalidArgument(format!("invalid biodata id: {raw}")))
}

pub async fn details(pool: &SqlitePool, raw_id: &str) -> Result<BiodataRow, ApiError> {
    let id = parse_id(raw_id)?;
    biodata_repo::find_by_id(pool, id)
        .await?
        .ok_or(ApiError::NotFound)
}

pub async fn set_status(
    pool: &SqlitePool,
    raw_id: &str,
    status: VisibilityStatus,
) -> Result<(), ApiError> {
    let id = parse_id(raw_id)?;
    let touched = biodata_repo::set_status(pool, id, status).await?;
    if touched == 0 {
        return Err(ApiError::NotFound);
    }
    info!(id, ?status, "biodata status updated");
    Ok(())
}

pub async fn make_premium(pool: &SqlitePool, raw_id: &str) -> Result<(), ApiError> {
    set_status(pool, raw_id, VisibilityStatus::Premium).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        schema::init(&pool).await.unwrap();
        pool
    }

    fn payload(age: i64, biodata_type: &str, division: &str) -> BiodataPayload {
        BiodataPayload {
            name: Some("Someone".to_string()),
            biodata_type: Some(biodata_type.to_string()),
            age: Some(age),
            division: Some(division.to_string()),
            occupation: Some("teacher".to_string()),
            image_url: None,
            mobile: Some("01700000000".to_string()),
            contact_email: Some("private@x.com".to_string()),
        }
    }

    #[tokio::test]
    async fn upsert_assigns_sequence_numbers_in_creation_order() {
        let pool = test_pool().await;

        let first = upsert_by_owner(&pool, "a@x.com", &payload(30, "female", "Dhaka"))
            .await
            .unwrap();
        assert!(first.created);

        upsert_by_owner(&pool, "b@x.com", &payload(28, "male", "Khulna"))
            .await
            .unwrap();

        let a = find_by_owner(&pool, "a@x.com").await.unwrap();
        let b = find_by_owner(&pool, "b@x.com").await.unwrap();
        assert_eq!(a.biodata_id, 1);
        assert_eq!(b.biodata_id, 2);
    }

    #[tokio::test]
    async fn second_upsert_merges_and_keeps_sequence() {
        let pool = test_pool().await;

        upsert_by_owner(&pool, "a@x.com", &payload(30, "female", "Dhaka"))
            .await
            .unwrap();
        upsert_by_owner(&pool, "other@x.com", &payload(40, "male", "Sylhet"))
            .await
            .unwrap();

        // Partial payload: only the age changes, everything else is untouched.
        let update = BiodataPayload {
            age: Some(31),
            ..Default::default()
        };
        let outcome = upsert_by_owner(&pool, "a@x.com", &update).await.unwrap();
        assert!(!outcome.created);

        let a = find_by_owner(&pool, "a@x.com").await.unwrap();
        assert_eq!(a.biodata_id, 1);
        assert_eq!(a.age, Some(31));
        assert_eq!(a.division.as_deref(), Some("Dhaka"));
        assert_eq!(a.mobile.as_deref(), Some("01700000000"));

        // Still exactly one row for that owner.
        assert_eq!(count(&pool).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn search_applies_every_provided_predicate() {
        let pool = test_pool().await;
        upsert_by_owner(&pool, "a@x.com", &payload(30, "female", "Dhaka"))
            .await
            .unwrap();
        upsert_by_owner(&pool, "b@x.com", &payload(45, "female", "Dhaka"))
            .await
            .unwrap();
        upsert_by_owner(&pool, "c@x.com", &payload(30, "male", "Khulna"))
            .await
            .unwrap();

        let query = SearchQuery {
            min_age: Some(25),
            max_age: Some(35),
            biodata_type: Some("female".to_string()),
            division: Some("Dhaka".to_string()),
            ..Default::default()
        };
        let result = search(&pool, &query).await.unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(result.biodatas.len(), 1);
        let hit = &result.biodatas[0];
        assert_eq!(hit.email, "a@x.com");
        assert!(hit.age.unwrap() >= 25 && hit.age.unwrap() <= 35);
        assert_eq!(hit.biodata_type.as_deref(), Some("female"));
        assert_eq!(hit.division.as_deref(), Some("Dhaka"));

        let absent = search(
            &pool,
            &SearchQuery {
                division: Some("Rajshahi".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(absent.count, 0);
        assert!(absent.biodatas.is_empty());
    }

    #[tokio::test]
    async fn unfiltered_search_matches_total_count_and_paginates() {
        let pool = test_pool().await;
        for i in 0..5 {
            upsert_by_owner(&pool, &format!("u{i}@x.com"), &payload(20 + i, "male", "Dhaka"))
                .await
                .unwrap();
        }

        // No page/size: the full set comes back.
        let all = search(&pool, &SearchQuery::default()).await.unwrap();
        assert_eq!(all.biodatas.len(), 5);
        assert_eq!(all.count, count(&pool).await.unwrap());

        // Offset pagination, insertion order.
        let page = search(
            &pool,
            &SearchQuery {
                page: Some(1),
                size: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(page.count, 5);
        assert_eq!(page.biodatas.len(), 2);
        assert_eq!(page.biodatas[0].biodata_id, 3);
        assert_eq!(page.biodatas[1].biodata_id, 4);
    }

    #[tokio::test]
    async fn details_distinguishes_bad_id_from_missing_row() {
        let pool = test_pool().await;
        assert!(matches!(
            details(&pool, "not-a-number").await,
            Err(ApiError::InvalidArgument(_))
        ));
        assert!(matches!(details(&pool, "42").await, Err(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn status_transitions_land_in_the_row() {
        let pool = test_pool().await;
        let outcome = upsert_by_owner(&pool, "a@x.com", &payload(30, "female", "Dhaka"))
            .await
            .unwrap();
        let id = outcome.id.to_string();

        set_status(&pool, &id, VisibilityStatus::Approved).await.unwrap();
        assert_eq!(
            find_by_owner(&pool, "a@x.com").await.unwrap().status,
            VisibilityStatus::Approved
        );

        make_premium(&pool, &id).await.unwrap();
        assert_eq!(
            find_by_owner(&pool, "a@x.com").await.unwrap().status,
            VisibilityStatus::Premium
        );

        assert!(matches!(
            set_status(&pool, "999", VisibilityStatus::Approved).await,
            Err(ApiError::NotFound)
        ));
    }
}
