use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    domain::{
        booking::{BookRoomParams, Booking, BookingState, DateRange},
        query::{BookingFilter, Page, Pagination},
        user::Actor,
    },
    use_cases::booking_database::{BookingDatabase, BookingDatabaseError},
};

type BookingResult<T> = Result<T, BookingError>;

/// Whether `room_id` has no active booking overlapping `range`.
///
/// The conflict query goes through `find_bookings`, which is never
/// paginated: a conflict sitting past the first page must still block.
/// The room itself is not looked up here.
pub async fn check_availability(
    db: Arc<impl BookingDatabase>,
    room_id: Uuid,
    range: DateRange,
) -> BookingResult<bool> {
    let filter = BookingFilter::conflicts_with(room_id, range);

    match db.find_bookings(filter).await {
        Ok(bookings) => Ok(bookings.is_empty()),
        Err(BookingDatabaseError::NotFound) => Ok(true),
        Err(err) => Err(BookingError::DatabaseError(err.to_string())),
    }
}

pub async fn create_booking(
    db: Arc<impl BookingDatabase>,
    actor: Actor,
    room_id: Uuid,
    params: BookRoomParams,
    now: DateTime<Utc>,
) -> BookingResult<Booking> {
    let range = params
        .validate(now)
        .map_err(|err| BookingError::InvalidParams(err.to_string()))?;

    if !check_availability(db.clone(), room_id, range).await? {
        info!(%room_id, "room is already booked for the requested range");
        return Err(BookingError::RoomAlreadyBooked(room_id));
    }

    let booking = Booking {
        id: Uuid::new_v4(),
        user_id: actor.user_id,
        room_id,
        num_persons: params.num_persons,
        from_date: range.from,
        till_date: range.till,
        canceled: false,
        created_at: now,
    };

    // The exclusion constraint catches a concurrent booking that slipped in
    // between the check above and this insert.
    let booking = db.create_booking(booking).await.map_err(|err| match err {
        BookingDatabaseError::Conflict(_) => BookingError::RoomAlreadyBooked(room_id),
        BookingDatabaseError::NotFound => BookingError::RoomNotFound(room_id),
        err => BookingError::DatabaseError(err.to_string()),
    })?;

    info!(booking_id = %booking.id, %room_id, user_id = %actor.user_id, "booking created");

    Ok(booking)
}

pub async fn get_booking(
    db: Arc<impl BookingDatabase>,
    booking_id: Uuid,
    actor: Actor,
) -> BookingResult<Booking> {
    let booking = db
        .get_booking_by_id(booking_id)
        .await
        .map_err(|err| map_lookup_error(err, booking_id))?;

    if !actor.can_access(booking.user_id) {
        warn!(%booking_id, user_id = %actor.user_id, "forbidden booking access");
        return Err(BookingError::Forbidden);
    }

    Ok(booking)
}

/// Cancelling an already canceled booking re-applies the update and succeeds;
/// the booking stays canceled.
pub async fn cancel_booking(
    db: Arc<impl BookingDatabase>,
    booking_id: Uuid,
    actor: Actor,
) -> BookingResult<Booking> {
    let mut booking = get_booking(db.clone(), booking_id, actor).await?;

    if booking.state() == BookingState::Canceled {
        info!(%booking_id, "booking already canceled");
    }

    let matched = db
        .set_booking_canceled(booking_id)
        .await
        .map_err(|err| map_lookup_error(err, booking_id))?;

    if matched == 0 {
        return Err(BookingError::BookingNotFound(booking_id));
    }

    booking.canceled = true;
    info!(%booking_id, user_id = %actor.user_id, "booking canceled");

    Ok(booking)
}

/// Authorization is left to the caller (admin-only route).
pub async fn list_bookings(
    db: Arc<impl BookingDatabase>,
    filter: BookingFilter,
    pagination: Pagination,
) -> BookingResult<Page<Booking>> {
    db.get_bookings(filter, pagination)
        .await
        .map_err(|err| match err {
            BookingDatabaseError::NotFound => BookingError::NoBookings,
            err => BookingError::DatabaseError(err.to_string()),
        })
}

fn map_lookup_error(err: BookingDatabaseError, booking_id: Uuid) -> BookingError {
    match err {
        BookingDatabaseError::NotFound => BookingError::BookingNotFound(booking_id),
        err => BookingError::DatabaseError(err.to_string()),
    }
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("{0}")]
    InvalidParams(String),
    #[error("room {0} is already booked")]
    RoomAlreadyBooked(Uuid),
    #[error("room {0} not found")]
    RoomNotFound(Uuid),
    #[error("booking {0} not found")]
    BookingNotFound(Uuid),
    #[error("no bookings found")]
    NoBookings,
    #[error("access forbidden")]
    Forbidden,
    #[error("database error: {0}")]
    DatabaseError(String),
}
