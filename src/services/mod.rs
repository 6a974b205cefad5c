pub mod forecast_service;
pub mod user_service;
