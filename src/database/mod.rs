pub mod account_repo;
pub mod biodata_repo;
pub mod favourite_repo;
pub mod payment_repo;
pub mod schema;
pub mod stats_repo;
pub mod success_story_repo;
