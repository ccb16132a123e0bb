use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::{
        FieldErrors,
        hotel::{CreateHotelParams, Hotel},
        query::{HotelFilter, Page, Pagination},
    },
    use_cases::hotel_database::{HotelDatabase, HotelDatabaseError},
};

type HotelResult<T> = Result<T, HotelError>;

/// New hotels start without rooms, `create_room` fills the list.
pub async fn create_hotel(db: Arc<impl HotelDatabase>, params: CreateHotelParams) -> HotelResult<Hotel> {
    let errors = params.field_errors();
    if !errors.is_empty() {
        return Err(HotelError::Validation(errors));
    }

    let hotel = Hotel {
        id: Uuid::new_v4(),
        name: params.name,
        location: params.location,
        rating: params.rating,
        rooms: Vec::new(),
        created_at: Utc::now(),
    };

    let hotel = db
        .create_hotel(hotel)
        .await
        .map_err(|err| HotelError::DatabaseError(err.to_string()))?;

    info!(hotel_id = %hotel.id, name = %hotel.name, "hotel created");

    Ok(hotel)
}

pub async fn get_hotel(db: Arc<impl HotelDatabase>, hotel_id: Uuid) -> HotelResult<Hotel> {
    db.get_hotel_by_id(hotel_id).await.map_err(|err| match err {
        HotelDatabaseError::NotFound => HotelError::HotelNotFound(hotel_id),
        err => HotelError::DatabaseError(err.to_string()),
    })
}

pub async fn list_hotels(
    db: Arc<impl HotelDatabase>,
    filter: HotelFilter,
    pagination: Pagination,
) -> HotelResult<Page<Hotel>> {
    db.get_hotels(filter, pagination)
        .await
        .map_err(|err| match err {
            HotelDatabaseError::NotFound => HotelError::NoHotels,
            err => HotelError::DatabaseError(err.to_string()),
        })
}

#[derive(Error, Debug)]
pub enum HotelError {
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("hotel {0} not found")]
    HotelNotFound(Uuid),
    #[error("no hotels found")]
    NoHotels,
    #[error("database error: {0}")]
    DatabaseError(String),
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use uuid::Uuid;

    use crate::{
        domain::{
            hotel::CreateHotelParams,
            query::{HotelFilter, Pagination},
        },
        use_cases::{
            hotel_database::{HotelDatabaseError, MockHotelDatabase},
            hotel_service::{HotelError, create_hotel, get_hotel, list_hotels},
        },
    };

    #[tokio::test]
    async fn created_hotel_has_no_rooms() {
        let mut db = MockHotelDatabase::new();
        db.expect_create_hotel()
            .withf(|hotel| hotel.rooms.is_empty() && hotel.rating == 4)
            .once()
            .returning(|hotel| Ok(hotel));

        let hotel = create_hotel(
            Arc::new(db),
            CreateHotelParams {
                name: "Bellucia".into(),
                location: "France".into(),
                rating: 4,
            },
        )
        .await
        .unwrap();

        assert_eq!(hotel.name, "Bellucia");
    }

    #[tokio::test]
    async fn invalid_hotel_is_not_stored() {
        let mut db = MockHotelDatabase::new();
        db.expect_create_hotel().never();

        let result = create_hotel(
            Arc::new(db),
            CreateHotelParams {
                name: "Bellucia".into(),
                location: "France".into(),
                rating: 9,
            },
        )
        .await;

        assert!(matches!(result, Err(HotelError::Validation(errors)) if errors.contains_key("rating")));
    }

    #[tokio::test]
    async fn missing_hotel() {
        let mut db = MockHotelDatabase::new();
        db.expect_get_hotel_by_id()
            .returning(|_| Err(HotelDatabaseError::NotFound));

        let hotel_id = Uuid::new_v4();
        let result = get_hotel(Arc::new(db), hotel_id).await;

        assert!(matches!(result, Err(HotelError::HotelNotFound(id)) if id == hotel_id));
    }

    #[tokio::test]
    async fn empty_hotel_listing() {
        let mut db = MockHotelDatabase::new();
        db.expect_get_hotels()
            .returning(|_, _| Err(HotelDatabaseError::NotFound));

        let result = list_hotels(Arc::new(db), HotelFilter::default(), Pagination::default()).await;

        assert!(matches!(result, Err(HotelError::NoHotels)));
    }
}
