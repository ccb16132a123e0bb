use crate::{
    domain::{
        query::{Page, Pagination, RoomFilter},
        room::Room,
    },
    infra::database::{PostgresDatabase, StoreFailure, filters::push_room_filter},
    use_cases::room_database::{RoomDatabase, RoomDatabaseError, RoomDatabaseResult},
};

impl From<sqlx::Error> for RoomDatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match StoreFailure::from(err) {
            StoreFailure::NotFound => RoomDatabaseError::NotFound,
            StoreFailure::Conflict(constraint) => {
                RoomDatabaseError::InternalDBError(format!("constraint violated: {constraint}"))
            }
            StoreFailure::Internal(message) => RoomDatabaseError::InternalDBError(message),
        }
    }
}

impl RoomDatabase for PostgresDatabase {
    async fn create_room(&self, room: Room) -> RoomDatabaseResult<Room> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Room>(
            "INSERT INTO rooms (id, size, seaside, price, hotel_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(room.id)
        .bind(room.size)
        .bind(room.seaside)
        .bind(room.price)
        .bind(room.hotel_id)
        .bind(room.created_at)
        .fetch_one(&mut *tx)
        .await?;

        let appended = sqlx::query("UPDATE hotels SET rooms = array_append(rooms, $1) WHERE id = $2")
            .bind(created.id)
            .bind(created.hotel_id)
            .execute(&mut *tx)
            .await?;

        // Dropping the transaction rolls the insert back.
        if appended.rows_affected() == 0 {
            return Err(RoomDatabaseError::NotFound);
        }

        tx.commit().await?;

        Ok(created)
    }

    async fn get_rooms(
        &self,
        filter: RoomFilter,
        pagination: Pagination,
    ) -> RoomDatabaseResult<Page<Room>> {
        let page = self
            .fetch_page("rooms", &pagination, |query| push_room_filter(query, &filter))
            .await?;

        Ok(page)
    }
}
