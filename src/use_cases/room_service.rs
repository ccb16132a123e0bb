use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::{
        FieldErrors,
        query::{Page, Pagination, RoomFilter},
        room::{CreateRoomParams, Room},
    },
    use_cases::room_database::{RoomDatabase, RoomDatabaseError},
};

type RoomResult<T> = Result<T, RoomError>;

pub async fn create_room(
    db: Arc<impl RoomDatabase>,
    hotel_id: Uuid,
    params: CreateRoomParams,
) -> RoomResult<Room> {
    let errors = params.field_errors();
    if !errors.is_empty() {
        return Err(RoomError::Validation(errors));
    }

    let room = Room {
        id: Uuid::new_v4(),
        size: params.size,
        seaside: params.seaside,
        price: params.price,
        hotel_id,
        created_at: Utc::now(),
    };

    let room = db.create_room(room).await.map_err(|err| match err {
        RoomDatabaseError::NotFound => RoomError::HotelNotFound(hotel_id),
        err => RoomError::DatabaseError(err.to_string()),
    })?;

    info!(room_id = %room.id, %hotel_id, "room created");

    Ok(room)
}

pub async fn list_rooms(
    db: Arc<impl RoomDatabase>,
    filter: RoomFilter,
    pagination: Pagination,
) -> RoomResult<Page<Room>> {
    db.get_rooms(filter, pagination)
        .await
        .map_err(|err| match err {
            RoomDatabaseError::NotFound => RoomError::NoRooms,
            err => RoomError::DatabaseError(err.to_string()),
        })
}

pub async fn get_hotel_rooms(
    db: Arc<impl RoomDatabase>,
    hotel_id: Uuid,
    pagination: Pagination,
) -> RoomResult<Page<Room>> {
    let filter = RoomFilter {
        hotel_id: Some(hotel_id),
        ..Default::default()
    };

    list_rooms(db, filter, pagination).await
}

#[derive(Error, Debug)]
pub enum RoomError {
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("hotel {0} not found")]
    HotelNotFound(Uuid),
    #[error("no rooms found")]
    NoRooms,
    #[error("database Error: {0}")]
    DatabaseError(String),
}
