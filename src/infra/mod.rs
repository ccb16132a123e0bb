pub mod database;
pub mod http_api;
