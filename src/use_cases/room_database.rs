use mockall::automock;
use thiserror::Error;

use crate::domain::{
    query::{Page, Pagination, RoomFilter},
    room::Room,
};

pub type RoomDatabaseResult<T> = Result<T, RoomDatabaseError>;

#[automock]
pub trait RoomDatabase: Send + Sync {
    /// Persists the room and appends its id to the owning hotel, atomically.
    /// `NotFound` when the hotel does not exist.
    async fn create_room(&self, room: Room) -> RoomDatabaseResult<Room>;

    async fn get_rooms(
        &self,
        filter: RoomFilter,
        pagination: Pagination,
    ) -> RoomDatabaseResult<Page<Room>>;
}

#[derive(Debug, Error)]
pub enum RoomDatabaseError {
    #[error("room not found")]
    NotFound,

    #[error("Internal DB error: {0}")]
    InternalDBError(String),
}
