pub mod auth_service;
pub mod booking_database;
pub mod booking_service;
pub mod hotel_database;
pub mod hotel_service;
pub mod room_database;
pub mod room_service;
pub mod user_database;
pub mod user_service;
