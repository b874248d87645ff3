pub mod account_service;
pub mod biodata_service;
pub mod contact_service;
pub mod payment_gateway;
pub mod reporting_service;
pub mod token_service;
