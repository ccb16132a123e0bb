use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::{
    domain::{
        booking::Booking,
        query::{BookingFilter, Page, Pagination},
    },
    infra::database::{
        PostgresDatabase, StoreFailure,
        filters::{Query, push_booking_filter},
    },
    use_cases::booking_database::{BookingDatabase, BookingDatabaseError, BookingDatabaseResult},
};

impl From<sqlx::Error> for BookingDatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match StoreFailure::from(err) {
            StoreFailure::NotFound => BookingDatabaseError::NotFound,
            StoreFailure::Conflict(constraint) => BookingDatabaseError::Conflict(constraint),
            StoreFailure::Internal(message) => BookingDatabaseError::InternalDBError(message),
        }
    }
}

impl BookingDatabase for PostgresDatabase {
    async fn create_booking(&self, booking: Booking) -> BookingDatabaseResult<Booking> {
        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, user_id, room_id, num_persons, from_date, till_date, canceled, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(booking.id)
        .bind(booking.user_id)
        .bind(booking.room_id)
        .bind(booking.num_persons)
        .bind(booking.from_date)
        .bind(booking.till_date)
        .bind(booking.canceled)
        .bind(booking.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_booking_by_id(&self, booking_id: Uuid) -> BookingDatabaseResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(BookingDatabaseError::NotFound)
    }

    async fn find_bookings(&self, filter: BookingFilter) -> BookingDatabaseResult<Vec<Booking>> {
        let mut query: Query = QueryBuilder::new("SELECT * FROM bookings WHERE TRUE");
        push_booking_filter(&mut query, &filter);
        query.push(" ORDER BY created_at, id");

        let bookings: Vec<Booking> = query.build_query_as().fetch_all(&self.pool).await?;

        if bookings.is_empty() {
            return Err(BookingDatabaseError::NotFound);
        }

        Ok(bookings)
    }

    async fn get_bookings(
        &self,
        filter: BookingFilter,
        pagination: Pagination,
    ) -> BookingDatabaseResult<Page<Booking>> {
        let page = self
            .fetch_page("bookings", &pagination, |query| {
                push_booking_filter(query, &filter)
            })
            .await?;

        Ok(page)
    }

    async fn set_booking_canceled(&self, booking_id: Uuid) -> BookingDatabaseResult<u64> {
        let result = sqlx::query("UPDATE bookings SET canceled = TRUE WHERE id = $1")
            .bind(booking_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
