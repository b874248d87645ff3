use serde::Serialize;
use sqlx::SqlitePool;

use crate::database::{biodata_repo, stats_repo};
use crate::database::stats_repo::{AdminStoryRow, PremiumBiodataRow};
use crate::web::error::ApiError;

#[derive(Debug, Serialize)]
pub struct AdminStats {
    pub total_biodatas: i64,
    pub male_count: i64,
    pub female_count: i64,
    pub premium_count: i64,
    pub revenue: i64,
}

pub async fn premium_listing(pool: &SqlitePool) -> Result<Vec<PremiumBiodataRow>, ApiError> {
    Ok(stats_repo::premium_listing(pool).await?)
}

pub async fn admin_stories(pool: &SqlitePool) -> Result<Vec<AdminStoryRow>, ApiError> {
    Ok(stats_repo::admin_stories(pool).await?)
}

/// Five independent reads, not one snapshot. Under concurrent writes the
/// figures may reflect different instants; that is the documented contract.
pub async fn admin_stats(pool: &SqlitePool) -> Result<AdminStats, ApiError> {
    let total_biodatas = biodata_repo::count(pool).await?;
    let male_count = stats_repo::count_by_type(pool, "male").await?;
    let female_count = stats_repo::count_by_type(pool, "female").await?;
    let premium_count = stats_repo::count_premium_status(pool).await?;
    let revenue = stats_repo::total_revenue(pool).await?;
    Ok(AdminStats {
        total_biodatas,
        male_count,
        female_count,
        premium_count,
        revenue,
    })
}
