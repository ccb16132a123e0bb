use mockall::automock;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    booking::Booking,
    query::{BookingFilter, Page, Pagination},
};

pub type BookingDatabaseResult<T> = Result<T, BookingDatabaseError>;

#[automock]
pub trait BookingDatabase: Send + Sync {
    /// `Conflict` when the insert would overlap an active booking of the room,
    /// `NotFound` when the room does not exist.
    async fn create_booking(&self, booking: Booking) -> BookingDatabaseResult<Booking>;

    async fn get_booking_by_id(&self, booking_id: Uuid) -> BookingDatabaseResult<Booking>;

    /// Every booking matching `filter`, without pagination.
    /// `NotFound` when nothing matches.
    async fn find_bookings(&self, filter: BookingFilter) -> BookingDatabaseResult<Vec<Booking>>;

    /// `NotFound` when the requested page is empty.
    async fn get_bookings(
        &self,
        filter: BookingFilter,
        pagination: Pagination,
    ) -> BookingDatabaseResult<Page<Booking>>;

    /// Sets `canceled = true`, returns the number of matched rows.
    async fn set_booking_canceled(&self, booking_id: Uuid) -> BookingDatabaseResult<u64>;
}

#[derive(Debug, Error)]
pub enum BookingDatabaseError {
    #[error("booking not found")]
    NotFound,

    #[error("booking conflicts with an existing one: {0}")]
    Conflict(String),

    #[error("Internal DB error: {0}")]
    InternalDBError(String),
}
