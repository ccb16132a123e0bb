use mockall::automock;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    hotel::Hotel,
    query::{HotelFilter, Page, Pagination},
};

pub type HotelDatabaseResult<T> = Result<T, HotelDatabaseError>;

#[automock]
pub trait HotelDatabase: Send + Sync {
    async fn create_hotel(&self, hotel: Hotel) -> HotelDatabaseResult<Hotel>;

    async fn get_hotel_by_id(&self, hotel_id: Uuid) -> HotelDatabaseResult<Hotel>;

    async fn get_hotels(
        &self,
        filter: HotelFilter,
        pagination: Pagination,
    ) -> HotelDatabaseResult<Page<Hotel>>;
}

#[derive(Debug, Error)]
pub enum HotelDatabaseError {
    #[error("hotel not found")]
    NotFound,

    #[error("Internal DB error: {0}")]
    InternalDBError(String),
}
