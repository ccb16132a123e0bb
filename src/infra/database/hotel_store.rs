use uuid::Uuid;

use crate::{
    domain::{
        hotel::Hotel,
        query::{HotelFilter, Page, Pagination},
    },
    infra::database::{PostgresDatabase, StoreFailure, filters::push_hotel_filter},
    use_cases::hotel_database::{HotelDatabase, HotelDatabaseError, HotelDatabaseResult},
};

impl From<sqlx::Error> for HotelDatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match StoreFailure::from(err) {
            StoreFailure::NotFound => HotelDatabaseError::NotFound,
            StoreFailure::Conflict(constraint) => {
                HotelDatabaseError::InternalDBError(format!("constraint violated: {constraint}"))
            }
            StoreFailure::Internal(message) => HotelDatabaseError::InternalDBError(message),
        }
    }
}

impl HotelDatabase for PostgresDatabase {
    async fn create_hotel(&self, hotel: Hotel) -> HotelDatabaseResult<Hotel> {
        let created = sqlx::query_as::<_, Hotel>(
            "INSERT INTO hotels (id, name, location, rating, rooms, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(hotel.id)
        .bind(&hotel.name)
        .bind(&hotel.location)
        .bind(hotel.rating)
        .bind(&hotel.rooms)
        .bind(hotel.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_hotel_by_id(&self, hotel_id: Uuid) -> HotelDatabaseResult<Hotel> {
        sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE id = $1")
            .bind(hotel_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(HotelDatabaseError::NotFound)
    }

    async fn get_hotels(
        &self,
        filter: HotelFilter,
        pagination: Pagination,
    ) -> HotelDatabaseResult<Page<Hotel>> {
        let page = self
            .fetch_page("hotels", &pagination, |query| push_hotel_filter(query, &filter))
            .await?;

        Ok(page)
    }
}
