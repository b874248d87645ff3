pub mod admin;
pub mod auth;
pub mod biodatas;
pub mod contact_requests;
pub mod favourites;
pub mod payments;
pub mod stories;
pub mod users;
